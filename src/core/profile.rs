use std::{fmt::Debug, fs, path::Path};

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        building::BuildingClass,
        cascade::Patch,
        heating::{HeatingSystem, Method},
        optimization::{CollectorType, Optimization},
    },
    ops::RangeInclusive,
    prelude::*,
    quantity::{
        area::SquareMeters,
        currency::Euros,
        fuel::FuelAmount,
        power::Kilowatts,
        price::{FuelPrice, KilowattHourPrice},
        ratios::Percentage,
        temperature::Celsius,
    },
    reference::Reference,
};

/// Everything the homeowner tells about the building, the current system and the plans.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Profile {
    pub method: Method,

    /// Annual consumption in the fuel unit of the heating system.
    pub consumption: FuelAmount,

    /// Heated floor area.
    pub area: SquareMeters,

    pub building_class: BuildingClass,
    pub heating_system: HeatingSystem,

    /// Annual efficiency of the old system, ignored for electric heating and new builds.
    pub old_efficiency: Percentage,

    /// Price per fuel unit of the old system.
    pub old_unit_price: FuelPrice,

    /// Grid electricity price, for the heat pump and for an old electric heating alike.
    pub grid_price: KilowattHourPrice,

    /// Informational: no formula consumes it.
    pub floor_heating_share: Percentage,

    pub flow_temperature: Celsius,

    pub optimizations: EnumSet<Optimization>,
    pub photovoltaics: Photovoltaics,
    pub solar_thermal: SolarThermal,

    pub investment: Euros,
    pub subsidy: Euros,

    /// Annual maintenance of the old system.
    pub old_maintenance: Euros,

    /// Annual maintenance of the heat pump.
    pub new_maintenance: Euros,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            method: Method::Area,
            consumption: FuelAmount(2000.0),
            area: SquareMeters(150.0),
            building_class: BuildingClass::Unrenovated,
            heating_system: HeatingSystem::Oil,
            old_efficiency: Percentage(80.0),
            old_unit_price: FuelPrice(1.03),
            grid_price: KilowattHourPrice(0.19),
            floor_heating_share: Percentage(50.0),
            flow_temperature: Celsius(55.0),
            optimizations: EnumSet::empty(),
            photovoltaics: Photovoltaics::default(),
            solar_thermal: SolarThermal::default(),
            investment: Euros(20_000.0),
            subsidy: Euros(5_000.0),
            old_maintenance: Euros(150.0),
            new_maintenance: Euros(250.0),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Photovoltaics {
    /// Installed peak power, kWp.
    pub capacity: Kilowatts,

    /// Share of the heat pump electricity covered by the own PV system.
    pub self_consumption: Percentage,

    /// Cost of the self-consumed PV electricity, for example, the lost feed-in tariff.
    pub price: KilowattHourPrice,
}

impl Default for Photovoltaics {
    fn default() -> Self {
        Self {
            capacity: Kilowatts(5.0),
            self_consumption: Percentage(30.0),
            price: KilowattHourPrice(0.08),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SolarThermal {
    /// Collector aperture area.
    pub area: SquareMeters,

    pub collector: CollectorType,
}

impl Default for SolarThermal {
    fn default() -> Self {
        Self { area: SquareMeters(4.0), collector: CollectorType::FlatPlate }
    }
}

impl Profile {
    /// Read a profile file: a TOML [`Patch`] on top of the defaults.
    #[instrument(name = "reading the profile…", skip(reference))]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P, reference: &Reference) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let patch: Patch = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        Ok(Self::from_patch(&patch, reference))
    }

    /// Build a profile from the defaults, as if the heating system and the building class were
    /// picked first and the other given fields edited afterwards.
    ///
    /// Unlike a single [`Profile::apply`], the explicitly given fields always win over the
    /// dependent defaults.
    pub fn from_patch(patch: &Patch, reference: &Reference) -> Self {
        let selection = Patch {
            heating_system: patch.heating_system,
            building_class: patch.building_class,
            ..Patch::default()
        };
        let rest = Patch { heating_system: None, building_class: None, ..patch.clone() };
        Self::default().apply(&selection, reference).apply(&rest, reference)
    }

    #[must_use]
    pub fn has(&self, optimization: Optimization) -> bool {
        self.optimizations.contains(optimization)
    }

    /// Whether the heat demand and the heat pump size follow from the floor area.
    #[must_use]
    pub const fn is_area_based(&self) -> bool {
        matches!(self.method, Method::Area) || self.heating_system.is_new_build()
    }

    /// Reject values the calculation would consume but which are out of their domain.
    ///
    /// Fields which the calculation ignores for this profile are not checked.
    pub fn validate(&self, reference: &Reference) -> Result {
        if self.is_area_based() {
            ensure!(
                self.area.is_finite() && self.area > SquareMeters::ZERO,
                "area must be positive, got {}",
                self.area,
            );
        } else {
            ensure!(
                self.consumption.is_finite() && self.consumption > FuelAmount::ZERO,
                "consumption must be positive, got {}",
                self.consumption,
            );
        }

        if self.heating_system.has_conversion_losses() {
            ensure!(
                reference.efficiency_range.contains(self.old_efficiency),
                "old system efficiency must be within {}, got {}",
                reference.efficiency_range,
                self.old_efficiency,
            );
        }
        if !self.heating_system.is_new_build() {
            let price_range = reference.price_ranges.get(self.heating_system);
            ensure!(
                price_range.contains(self.old_unit_price),
                "price of `{:?}` must be within {price_range}, got {}",
                self.heating_system,
                self.old_unit_price,
            );
        }

        ensure_non_negative("grid price", self.grid_price.0)?;
        ensure_non_negative("investment", self.investment.0)?;
        ensure_non_negative("subsidy", self.subsidy.0)?;
        ensure_non_negative("old system maintenance", self.old_maintenance.0)?;
        ensure_non_negative("heat pump maintenance", self.new_maintenance.0)?;
        ensure_percentage("floor heating share", self.floor_heating_share)?;
        ensure!(
            reference.flow_temperature_range.contains(self.flow_temperature),
            "flow temperature must be within {}, got {}",
            reference.flow_temperature_range,
            self.flow_temperature,
        );

        if self.has(Optimization::Photovoltaics) {
            ensure_non_negative("PV capacity", self.photovoltaics.capacity.0)?;
            ensure_non_negative("PV electricity price", self.photovoltaics.price.0)?;
            ensure_percentage("PV self-consumption", self.photovoltaics.self_consumption)?;
        }
        if self.has(Optimization::SolarThermal) {
            ensure_non_negative("collector area", self.solar_thermal.area.0)?;
        }

        Ok(())
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result {
    ensure!(value.is_finite() && value >= 0.0, "{name} must be non-negative, got {value}");
    Ok(())
}

fn ensure_percentage(name: &str, value: Percentage) -> Result {
    let range = RangeInclusive::from(Percentage::ZERO..=Percentage::HUNDRED);
    ensure!(range.contains(value), "{name} must be within {range}, got {value}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() -> Result {
        Profile::default().validate(&Reference::default())
    }

    #[test]
    fn test_negative_area_rejected() {
        let profile = Profile { area: SquareMeters(-10.0), ..Profile::default() };
        assert!(profile.validate(&Reference::default()).is_err());
    }

    #[test]
    fn test_area_ignored_for_consumption_method() -> Result {
        let profile =
            Profile { method: Method::Consumption, area: SquareMeters::ZERO, ..Profile::default() };
        profile.validate(&Reference::default())
    }

    #[test]
    fn test_zero_consumption_rejected() {
        let profile = Profile {
            method: Method::Consumption,
            consumption: FuelAmount::ZERO,
            ..Profile::default()
        };
        assert!(profile.validate(&Reference::default()).is_err());
    }

    #[test]
    fn test_price_outside_slider_rejected() {
        let profile = Profile { old_unit_price: FuelPrice(3.10), ..Profile::default() };
        assert!(profile.validate(&Reference::default()).is_err());
    }

    #[test]
    fn test_efficiency_ignored_for_electric_heating() -> Result {
        let profile = Profile {
            heating_system: HeatingSystem::Electricity,
            old_efficiency: Percentage(20.0),
            old_unit_price: FuelPrice(0.30),
            ..Profile::default()
        };
        profile.validate(&Reference::default())
    }

    #[test]
    fn test_low_efficiency_rejected() {
        let profile = Profile { old_efficiency: Percentage(45.0), ..Profile::default() };
        assert!(profile.validate(&Reference::default()).is_err());
    }

    #[test]
    fn test_flow_temperature_outside_range_rejected() {
        let profile = Profile { flow_temperature: Celsius(80.0), ..Profile::default() };
        assert!(profile.validate(&Reference::default()).is_err());
    }

    #[test]
    fn test_inactive_photovoltaics_not_validated() -> Result {
        let mut profile = Profile::default();
        profile.photovoltaics.self_consumption = Percentage(150.0);
        profile.validate(&Reference::default())?;

        profile.optimizations.insert(Optimization::Photovoltaics);
        assert!(profile.validate(&Reference::default()).is_err());
        Ok(())
    }

    #[test]
    fn test_partial_toml() -> Result {
        // language=toml
        let patch: Patch = toml::from_str(
            r#"
                method = "consumption"
                consumption = 1800
                heating-system = "natural-gas-h"
                old-unit-price = 1.2
                optimizations = ["photovoltaics", "radiator-fans"]
                pv-capacity = 8.5
            "#,
        )?;
        let profile = Profile::from_patch(&patch, &Reference::default());
        assert_eq!(profile.method, Method::Consumption);
        assert_eq!(profile.consumption, FuelAmount(1800.0));
        assert_eq!(profile.heating_system, HeatingSystem::NaturalGasH);
        assert_eq!(profile.old_unit_price, FuelPrice(1.2));
        assert_eq!(profile.old_efficiency, Percentage(82.0));
        assert!(profile.has(Optimization::Photovoltaics));
        assert!(profile.has(Optimization::RadiatorFans));
        assert!(!profile.has(Optimization::SolarThermal));
        assert_eq!(profile.photovoltaics.capacity, Kilowatts(8.5));
        assert_eq!(profile.photovoltaics.self_consumption, Percentage(30.0));
        assert_eq!(profile.area, SquareMeters(150.0));
        Ok(())
    }

    #[test]
    fn test_heating_system_alone_takes_its_defaults() -> Result {
        let reference = Reference::default();
        let cases = [("lpg", HeatingSystem::Lpg), ("pellets", HeatingSystem::Pellets)];
        for (name, heating_system) in cases {
            let patch: Patch = toml::from_str(&format!("heating-system = \"{name}\""))?;
            let profile = Profile::from_patch(&patch, &reference);
            assert_eq!(profile.old_efficiency, reference.default_efficiency(heating_system));
            assert_eq!(profile.old_unit_price, reference.default_price(heating_system));
            profile.validate(&reference)?;
        }
        Ok(())
    }

    #[test]
    fn test_given_fields_win_over_class_defaults() -> Result {
        // language=toml
        let patch: Patch = toml::from_str(
            r#"
                building-class = "renovated"
                flow-temperature = 40
            "#,
        )?;
        let profile = Profile::from_patch(&patch, &Reference::default());
        assert_eq!(profile.building_class, BuildingClass::Renovated);
        assert_eq!(profile.flow_temperature, Celsius(40.0));
        assert_eq!(profile.floor_heating_share, Percentage(30.0));
        Ok(())
    }

    #[test]
    fn test_read_from_file() -> Result {
        let path = std::env::temp_dir().join("heat-pump-calculator-test-profile.toml");
        fs::write(&path, "heating-system = \"lpg\"\n")?;
        let reference = Reference::default();
        let profile = Profile::read_from(&path, &reference);
        fs::remove_file(&path)?;
        assert_eq!(profile?.old_unit_price, reference.default_price(HeatingSystem::Lpg));
        Ok(())
    }
}
