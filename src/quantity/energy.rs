use crate::quantity::{area::SquareMeters, power::Kilowatts, time::Hours};

quantity!(KilowattHours, via: f64, suffix: "kWh", precision: 0);

quantity!(
    /// Annual energy per floor area, or annual collector yield per aperture area.
    KilowattHoursPerSquareMeter, via: f64, suffix: "kWh/m²", precision: 0
);

implement_mul!(SquareMeters, KilowattHoursPerSquareMeter, KilowattHours);
implement_div!(KilowattHours, Hours, Kilowatts);
