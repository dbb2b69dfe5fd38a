use crate::quantity::energy::KilowattHours;

quantity!(
    /// Kilograms of CO₂.
    Kilograms, via: f64, suffix: "kg", precision: 0
);

quantity!(
    /// Kilograms of CO₂ per kilowatt-hour of consumed energy.
    Co2Intensity, via: f64, suffix: "kg/kWh", precision: 3
);

implement_mul!(KilowattHours, Co2Intensity, Kilograms);
