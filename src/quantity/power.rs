use crate::quantity::{area::SquareMeters, energy::KilowattHours, time::Hours};

quantity!(Watts, via: f64, suffix: "W", precision: 0);
quantity!(Kilowatts, via: f64, suffix: "kW", precision: 2);

quantity!(
    /// Specific heat load: design heat loss per floor area.
    WattsPerSquareMeter, via: f64, suffix: "W/m²", precision: 0
);

impl From<Kilowatts> for Watts {
    fn from(kilowatts: Kilowatts) -> Self {
        Self(kilowatts.0 * 1000.0)
    }
}

impl From<Watts> for Kilowatts {
    fn from(watts: Watts) -> Self {
        Self(watts.0 / 1000.0)
    }
}

implement_mul!(SquareMeters, WattsPerSquareMeter, Watts);
implement_mul!(Kilowatts, Hours, KilowattHours);
