use crate::quantity::{currency::Euros, energy::KilowattHours, fuel::FuelAmount};

quantity!(KilowattHourPrice, via: f64, suffix: "€/kWh", precision: 3);

quantity!(
    /// Price of one unit of fuel, see [`FuelAmount`].
    FuelPrice, via: f64, suffix: "€/unit", precision: 3
);

implement_mul!(KilowattHours, KilowattHourPrice, Euros);
implement_mul!(FuelAmount, FuelPrice, Euros);
