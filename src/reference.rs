//! Reference data: the coefficients the calculation is built from.
//!
//! The table is plain data. It is passed by reference into the calculator and the defaults
//! cascade, so that alternative coefficient sets can be loaded from TOML or built in tests.

use std::{fmt::Debug, fs, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    core::{building::BuildingClass, heating::HeatingSystem, optimization::CollectorType},
    ops::RangeInclusive,
    prelude::*,
    quantity::{
        efficiency::Scop,
        emissions::{Co2Intensity, Kilograms},
        energy::KilowattHoursPerSquareMeter,
        fuel::EnergyDensity,
        power::WattsPerSquareMeter,
        price::FuelPrice,
        ratios::Percentage,
        temperature::Celsius,
        time::Hours,
    },
};

#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Reference {
    /// Date the default prices were surveyed. Informational only.
    pub prices_as_of: NaiveDate,

    /// Applied to the sized heat pump power to avoid undersizing.
    pub sizing_margin: f64,

    /// Flow temperature reduction provided by radiator fans.
    pub fan_temperature_reduction: Celsius,

    /// Heat pump electricity emissions, regardless of the PV share.
    pub grid_co2: Co2Intensity,

    /// Annual CO₂ uptake of one football field of forest.
    pub forest_field_co2: Kilograms,

    /// Annual PV yield per installed kilowatt-peak, that is, kWh/kWp.
    pub pv_specific_yield: Hours,

    /// Share of the PV yield which may realistically be consumed by the heat pump directly.
    pub pv_realism_factor: f64,

    /// Accepted user-facing range of the old system efficiency.
    pub efficiency_range: RangeInclusive<Percentage>,

    /// Accepted user-facing range of the flow temperature.
    pub flow_temperature_range: RangeInclusive<Celsius>,

    pub scop_curve: ScopCurve,
    pub energy_factors: PerHeatingSystem<EnergyDensity>,
    pub default_prices: PerHeatingSystem<FuelPrice>,
    pub price_ranges: PerHeatingSystem<RangeInclusive<FuelPrice>>,
    pub default_efficiencies: PerHeatingSystem<Percentage>,
    pub co2_factors: PerHeatingSystem<Co2Intensity>,
    pub heat_demand: PerBuildingClass<KilowattHoursPerSquareMeter>,
    pub specific_heat_load: PerBuildingClass<WattsPerSquareMeter>,
    pub full_load_hours: PerBuildingClass<Hours>,
    pub emitter_defaults: PerBuildingClass<EmitterDefaults>,
    pub solar_yield: PerCollectorType<KilowattHoursPerSquareMeter>,
}

impl Default for Reference {
    fn default() -> Self {
        Self {
            prices_as_of: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default(),
            sizing_margin: 1.1,
            fan_temperature_reduction: Celsius(5.0),
            grid_co2: Co2Intensity(0.12),
            forest_field_co2: Kilograms(5600.0),
            pv_specific_yield: Hours(1000.0),
            pv_realism_factor: 0.4,
            efficiency_range: RangeInclusive::from(Percentage(50.0)..=Percentage::HUNDRED),
            flow_temperature_range: RangeInclusive::from(Celsius(30.0)..=Celsius(75.0)),
            scop_curve: ScopCurve::default(),
            energy_factors: PerHeatingSystem {
                oil: EnergyDensity(9.9),
                natural_gas_h: EnergyDensity(10.6),
                natural_gas_l: EnergyDensity(9.2),
                lpg: EnergyDensity(6.7),
                pellets: EnergyDensity(4.9),
                electricity: EnergyDensity(1.0),
                none: EnergyDensity(0.0),
            },
            default_prices: PerHeatingSystem {
                oil: FuelPrice(1.03),
                // 11 ct per kilowatt-hour:
                natural_gas_h: FuelPrice(0.11 * 10.6),
                natural_gas_l: FuelPrice(0.11 * 9.2),
                lpg: FuelPrice(0.70),
                pellets: FuelPrice(0.30),
                electricity: FuelPrice(0.19),
                none: FuelPrice(0.0),
            },
            price_ranges: PerHeatingSystem {
                oil: RangeInclusive::from(FuelPrice(0.50)..=FuelPrice(2.50)),
                natural_gas_h: RangeInclusive::from(FuelPrice(0.50)..=FuelPrice(3.00)),
                natural_gas_l: RangeInclusive::from(FuelPrice(0.50)..=FuelPrice(3.00)),
                lpg: RangeInclusive::from(FuelPrice(0.40)..=FuelPrice(2.00)),
                pellets: RangeInclusive::from(FuelPrice(0.15)..=FuelPrice(0.80)),
                electricity: RangeInclusive::from(FuelPrice(0.15)..=FuelPrice(0.60)),
                none: RangeInclusive::from(FuelPrice::ZERO..=FuelPrice::ZERO),
            },
            default_efficiencies: PerHeatingSystem {
                oil: Percentage(80.0),
                natural_gas_h: Percentage(82.0),
                natural_gas_l: Percentage(82.0),
                lpg: Percentage(85.0),
                pellets: Percentage(88.0),
                electricity: Percentage::HUNDRED,
                none: Percentage::HUNDRED,
            },
            co2_factors: PerHeatingSystem {
                oil: Co2Intensity(0.269),
                natural_gas_h: Co2Intensity(0.202),
                natural_gas_l: Co2Intensity(0.202),
                lpg: Co2Intensity(0.230),
                pellets: Co2Intensity(0.02),
                electricity: Co2Intensity(0.12),
                none: Co2Intensity(0.0),
            },
            heat_demand: PerBuildingClass {
                unrenovated: KilowattHoursPerSquareMeter(200.0),
                partially_renovated: KilowattHoursPerSquareMeter(150.0),
                renovated: KilowattHoursPerSquareMeter(100.0),
                new_build: KilowattHoursPerSquareMeter(70.0),
                low_energy: KilowattHoursPerSquareMeter(30.0),
            },
            specific_heat_load: PerBuildingClass {
                unrenovated: WattsPerSquareMeter(100.0),
                partially_renovated: WattsPerSquareMeter(70.0),
                renovated: WattsPerSquareMeter(50.0),
                new_build: WattsPerSquareMeter(40.0),
                low_energy: WattsPerSquareMeter(25.0),
            },
            full_load_hours: PerBuildingClass {
                unrenovated: Hours(2200.0),
                partially_renovated: Hours(2000.0),
                renovated: Hours(2000.0),
                new_build: Hours(1800.0),
                low_energy: Hours(1800.0),
            },
            emitter_defaults: PerBuildingClass {
                unrenovated: EmitterDefaults::new(0.0, 60.0),
                partially_renovated: EmitterDefaults::new(10.0, 55.0),
                renovated: EmitterDefaults::new(30.0, 48.0),
                new_build: EmitterDefaults::new(90.0, 40.0),
                low_energy: EmitterDefaults::new(100.0, 35.0),
            },
            solar_yield: PerCollectorType {
                flat_plate: KilowattHoursPerSquareMeter(350.0),
                evacuated_tube: KilowattHoursPerSquareMeter(450.0),
            },
        }
    }
}

impl Reference {
    #[instrument(name = "reading the reference table…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let reference: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        reference.validate()?;
        Ok(reference)
    }

    /// Reject coefficient sets which would make the calculation divide by zero or go negative.
    pub fn validate(&self) -> Result {
        ensure!(
            self.sizing_margin.is_finite() && self.sizing_margin >= 1.0,
            "sizing margin must be at least 1, got {}",
            self.sizing_margin,
        );
        ensure!(
            self.forest_field_co2.is_finite() && self.forest_field_co2 > Kilograms::ZERO,
            "forest field CO₂ uptake must be positive, got {}",
            self.forest_field_co2,
        );
        ensure!(
            self.grid_co2.is_finite() && self.grid_co2 >= Co2Intensity::ZERO,
            "grid CO₂ intensity must be non-negative, got {}",
            self.grid_co2,
        );
        ensure!(
            self.fan_temperature_reduction.is_finite(),
            "fan temperature reduction must be finite",
        );
        self.scop_curve.validate()?;

        for heating_system in HeatingSystem::ALL {
            if heating_system.is_new_build() {
                continue;
            }
            let energy_factor = self.energy_factors.get(heating_system);
            ensure!(
                energy_factor.is_finite() && energy_factor > EnergyDensity::ZERO,
                "energy factor of `{heating_system:?}` must be positive, got {energy_factor}",
            );
            let price_range = self.price_ranges.get(heating_system);
            ensure!(
                price_range.min <= price_range.max,
                "price range of `{heating_system:?}` is empty: {price_range}",
            );
        }

        for building_class in BuildingClass::ALL {
            let full_load_hours = self.full_load_hours.get(building_class);
            ensure!(
                full_load_hours.is_finite() && full_load_hours > Hours::ZERO,
                "full-load hours of `{building_class:?}` must be positive, got {full_load_hours}",
            );
        }

        Ok(())
    }

    /// Default price of one fuel unit.
    #[must_use]
    pub fn default_price(&self, heating_system: HeatingSystem) -> FuelPrice {
        self.default_prices.get(heating_system)
    }

    #[must_use]
    pub fn default_efficiency(&self, heating_system: HeatingSystem) -> Percentage {
        self.default_efficiencies.get(heating_system)
    }
}

/// Default emitter setup of a building class.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmitterDefaults {
    pub floor_heating_share: Percentage,
    pub flow_temperature: Celsius,
}

impl EmitterDefaults {
    pub const fn new(floor_heating_share: f64, flow_temperature: f64) -> Self {
        Self {
            floor_heating_share: Percentage(floor_heating_share),
            flow_temperature: Celsius(flow_temperature),
        }
    }
}

/// Linear SCOP characteristic, defined by two anchor points.
///
/// Temperatures outside the anchors extrapolate along the same line.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScopCurve {
    pub low_temperature: Celsius,
    pub low_temperature_scop: Scop,
    pub high_temperature: Celsius,
    pub high_temperature_scop: Scop,
}

impl Default for ScopCurve {
    fn default() -> Self {
        Self {
            low_temperature: Celsius(35.0),
            low_temperature_scop: Scop(4.8),
            high_temperature: Celsius(55.0),
            high_temperature_scop: Scop(3.2),
        }
    }
}

impl ScopCurve {
    pub fn validate(&self) -> Result {
        ensure!(
            self.low_temperature.is_finite()
                && self.high_temperature.is_finite()
                && self.low_temperature != self.high_temperature,
            "SCOP curve anchors must be two distinct temperatures, got {} and {}",
            self.low_temperature,
            self.high_temperature,
        );
        ensure!(
            self.low_temperature_scop.0.is_finite() && self.high_temperature_scop.0.is_finite(),
            "SCOP curve values must be finite",
        );
        Ok(())
    }

    /// SCOP at the given flow temperature.
    pub fn at(&self, flow_temperature: Celsius) -> Scop {
        let position = (flow_temperature - self.low_temperature)
            / (self.high_temperature - self.low_temperature);
        Scop(
            self.low_temperature_scop.0
                + position * (self.high_temperature_scop.0 - self.low_temperature_scop.0),
        )
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PerHeatingSystem<T> {
    pub oil: T,
    pub natural_gas_h: T,
    pub natural_gas_l: T,
    pub lpg: T,
    pub pellets: T,
    pub electricity: T,
    pub none: T,
}

impl<T: Copy> PerHeatingSystem<T> {
    pub fn get(&self, heating_system: HeatingSystem) -> T {
        match heating_system {
            HeatingSystem::Oil => self.oil,
            HeatingSystem::NaturalGasH => self.natural_gas_h,
            HeatingSystem::NaturalGasL => self.natural_gas_l,
            HeatingSystem::Lpg => self.lpg,
            HeatingSystem::Pellets => self.pellets,
            HeatingSystem::Electricity => self.electricity,
            HeatingSystem::None => self.none,
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PerBuildingClass<T> {
    pub unrenovated: T,
    pub partially_renovated: T,
    pub renovated: T,
    pub new_build: T,
    pub low_energy: T,
}

impl<T: Copy> PerBuildingClass<T> {
    pub fn get(&self, building_class: BuildingClass) -> T {
        match building_class {
            BuildingClass::Unrenovated => self.unrenovated,
            BuildingClass::PartiallyRenovated => self.partially_renovated,
            BuildingClass::Renovated => self.renovated,
            BuildingClass::NewBuild => self.new_build,
            BuildingClass::LowEnergy => self.low_energy,
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PerCollectorType<T> {
    pub flat_plate: T,
    pub evacuated_tube: T,
}

impl<T: Copy> PerCollectorType<T> {
    pub fn get(&self, collector_type: CollectorType) -> T {
        match collector_type {
            CollectorType::FlatPlate => self.flat_plate,
            CollectorType::EvacuatedTube => self.evacuated_tube,
        }
    }
}
