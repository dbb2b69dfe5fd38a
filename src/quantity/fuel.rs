use crate::quantity::energy::KilowattHours;

quantity!(
    /// Amount of fuel in its native unit: litres, cubic meters, kilograms or kilowatt-hours.
    FuelAmount, via: f64, suffix: "units", precision: 0
);

quantity!(
    /// Final energy contained in one unit of fuel.
    EnergyDensity, via: f64, suffix: "kWh/unit", precision: 1
);

implement_mul!(FuelAmount, EnergyDensity, KilowattHours);
implement_div!(KilowattHours, EnergyDensity, FuelAmount);
