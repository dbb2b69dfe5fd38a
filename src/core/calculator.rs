use crate::{
    core::{
        optimization::Optimization,
        profile::Profile,
        results::{Amortization, PhotovoltaicsSummary, Results},
    },
    prelude::*,
    quantity::{
        currency::Euros,
        efficiency::Scop,
        emissions::Kilograms,
        energy::KilowattHours,
        power::Kilowatts,
        temperature::Celsius,
        time::Years,
    },
    reference::Reference,
};

/// Estimates the old system's running cost against a heat pump's.
///
/// Holds nothing but the reference table, so one calculator may be shared between threads.
#[must_use]
pub struct Calculator<'a> {
    reference: &'a Reference,
}

impl<'a> Calculator<'a> {
    pub fn try_new(reference: &'a Reference) -> Result<Self> {
        reference.validate().context("invalid reference table")?;
        Ok(Self { reference })
    }

    #[instrument(skip_all, fields(heating_system = ?profile.heating_system, method = ?profile.method))]
    pub fn calculate(&self, profile: &Profile) -> Result<Results> {
        profile.validate(self.reference).context("invalid profile")?;

        let (input_energy, useful_heat_demand) = self.heat_demand(profile);
        debug!(?input_energy, ?useful_heat_demand);

        let old_system_cost = self.old_system_cost(profile, input_energy);
        let old_system_co2 = input_energy * self.reference.co2_factors.get(profile.heating_system);

        let heat_pump_power = self.heat_pump_power(profile, useful_heat_demand);

        let fan_effect = profile
            .has(Optimization::RadiatorFans)
            .then_some(self.reference.fan_temperature_reduction);
        let effective_flow_temperature =
            profile.flow_temperature - fan_effect.unwrap_or(Celsius::ZERO);
        let effective_efficiency = self.reference.scop_curve.at(effective_flow_temperature);
        ensure!(
            effective_efficiency.0.is_finite() && effective_efficiency > Scop(0.0),
            "the SCOP curve yields {effective_efficiency:?} at {effective_flow_temperature}",
        );
        debug!(?heat_pump_power, ?effective_efficiency);

        let solar_thermal_yield = profile.has(Optimization::SolarThermal).then(|| {
            profile.solar_thermal.area * self.reference.solar_yield.get(profile.solar_thermal.collector)
        });
        let heat_pump_heat_demand = solar_thermal_yield.map_or(useful_heat_demand, |solar_yield| {
            (useful_heat_demand - solar_yield).max(KilowattHours::ZERO)
        });

        let heat_pump_electricity = heat_pump_heat_demand / effective_efficiency;
        let photovoltaics = profile.has(Optimization::Photovoltaics).then(|| {
            let self_supplied = heat_pump_electricity * profile.photovoltaics.self_consumption;
            PhotovoltaicsSummary {
                annual_yield: profile.photovoltaics.capacity * self.reference.pv_specific_yield,
                self_supplied,
                grid_supplied: heat_pump_electricity - self_supplied,
            }
        });
        let electricity_cost = photovoltaics.map_or_else(
            || heat_pump_electricity * profile.grid_price,
            |photovoltaics| {
                let realistic_yield = photovoltaics.annual_yield * self.reference.pv_realism_factor;
                if photovoltaics.self_supplied > realistic_yield {
                    warn!(
                        self_supplied = ?photovoltaics.self_supplied,
                        ?realistic_yield,
                        "the PV system is unlikely to cover that much of the heat pump",
                    );
                }
                photovoltaics.grid_supplied * profile.grid_price
                    + photovoltaics.self_supplied * profile.photovoltaics.price
            },
        );
        let new_system_cost = electricity_cost + profile.new_maintenance;
        let new_system_co2 = heat_pump_electricity * self.reference.grid_co2;

        let annual_savings = old_system_cost - new_system_cost;
        let annual_co2_savings = old_system_co2 - new_system_co2;
        let forest_equivalent =
            annual_co2_savings.max(Kilograms::ZERO) / self.reference.forest_field_co2;
        let effective_investment = (profile.investment - profile.subsidy).max(Euros::ZERO);
        let amortization = if profile.heating_system.is_new_build() {
            Amortization::NotApplicable
        } else if annual_savings <= Euros::ZERO {
            Amortization::Never
        } else if effective_investment > Euros::ZERO {
            Amortization::Years(Years(effective_investment / annual_savings))
        } else {
            Amortization::Immediate
        };
        info!(?annual_savings, ?annual_co2_savings, %amortization, "calculated");

        Ok(Results {
            input_energy,
            useful_heat_demand,
            old_system_cost,
            old_system_co2,
            heat_pump_power,
            effective_efficiency,
            fan_effect,
            solar_thermal_yield,
            heat_pump_heat_demand,
            heat_pump_electricity,
            photovoltaics,
            new_system_cost,
            new_system_co2,
            annual_savings,
            annual_co2_savings,
            forest_equivalent,
            effective_investment,
            amortization,
        })
    }

    /// Final energy of the old system and the useful heat it delivers.
    fn heat_demand(&self, profile: &Profile) -> (KilowattHours, KilowattHours) {
        let area_based = profile.area * self.reference.heat_demand.get(profile.building_class);
        if profile.heating_system.is_new_build() {
            return (KilowattHours::ZERO, area_based);
        }
        let input_energy = if profile.is_area_based() {
            area_based
        } else {
            profile.consumption * self.reference.energy_factors.get(profile.heating_system)
        };
        let useful_heat_demand = if profile.heating_system.has_conversion_losses() {
            input_energy * profile.old_efficiency
        } else {
            input_energy
        };
        (input_energy, useful_heat_demand)
    }

    fn old_system_cost(&self, profile: &Profile, input_energy: KilowattHours) -> Euros {
        if profile.heating_system.is_new_build() {
            return Euros::ZERO;
        }
        let consumption = if profile.is_area_based() {
            input_energy / self.reference.energy_factors.get(profile.heating_system)
        } else {
            profile.consumption
        };
        consumption * profile.old_unit_price + profile.old_maintenance
    }

    fn heat_pump_power(&self, profile: &Profile, useful_heat_demand: KilowattHours) -> Kilowatts {
        let power = if profile.is_area_based() {
            Kilowatts::from(
                profile.area * self.reference.specific_heat_load.get(profile.building_class),
            )
        } else {
            useful_heat_demand / self.reference.full_load_hours.get(profile.building_class)
        };
        power * self.reference.sizing_margin
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::{
            building::BuildingClass,
            heating::{HeatingSystem, Method},
            optimization::CollectorType,
        },
        quantity::{
            area::SquareMeters,
            fuel::FuelAmount,
            price::{FuelPrice, KilowattHourPrice},
            ratios::Percentage,
        },
    };

    fn calculate(profile: &Profile) -> Result<Results> {
        Calculator::try_new(&Reference::default())?.calculate(profile)
    }

    #[test]
    fn test_unrenovated_oil_by_area() -> Result {
        let results = calculate(&Profile::default())?;
        assert_abs_diff_eq!(results.input_energy.0, 30_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.useful_heat_demand.0, 24_000.0, epsilon = 1e-9);

        // 30000 kWh / 9.9 kWh/l × 1.03 €/l + 150 €:
        assert_abs_diff_eq!(results.old_system_cost.0, 30_000.0 / 9.9 * 1.03 + 150.0, epsilon = 1e-6);
        assert_abs_diff_eq!(results.old_system_co2.0, 8070.0, epsilon = 1e-6);

        assert_abs_diff_eq!(results.heat_pump_power.0, 16.5, epsilon = 1e-9);
        assert_abs_diff_eq!(results.effective_efficiency.0, 3.2, epsilon = 1e-12);
        assert_abs_diff_eq!(results.heat_pump_electricity.0, 7500.0, epsilon = 1e-6);
        assert_abs_diff_eq!(results.new_system_cost.0, 7500.0 * 0.19 + 250.0, epsilon = 1e-6);
        assert_abs_diff_eq!(results.new_system_co2.0, 900.0, epsilon = 1e-6);
        assert_abs_diff_eq!(results.annual_co2_savings.0, 7170.0, epsilon = 1e-6);
        assert_abs_diff_eq!(results.forest_equivalent, 7170.0 / 5600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.effective_investment.0, 15_000.0);

        let years = results.amortization.years().map(|years| years.0);
        let expected = 15_000.0 / results.annual_savings.0;
        assert!(years.is_some_and(|years| (years - expected).abs() < 1e-9), "{years:?}");
        Ok(())
    }

    #[test]
    fn test_low_energy_new_build() -> Result {
        let profile = Profile {
            heating_system: HeatingSystem::None,
            building_class: BuildingClass::LowEnergy,
            ..Profile::default()
        };
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.heat_pump_power.0, 4.125, epsilon = 1e-9);
        assert_abs_diff_eq!(results.useful_heat_demand.0, 4500.0, epsilon = 1e-9);
        assert_eq!(results.old_system_cost, Euros::ZERO);
        assert_eq!(results.old_system_co2, Kilograms::ZERO);
        assert_eq!(results.amortization, Amortization::NotApplicable);
        Ok(())
    }

    #[test]
    fn test_new_build_ignores_consumption_method() -> Result {
        let profile = Profile {
            heating_system: HeatingSystem::None,
            method: Method::Consumption,
            consumption: FuelAmount::ZERO,
            ..Profile::default()
        };
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.heat_pump_power.0, 16.5, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_radiator_fans() -> Result {
        let mut profile = Profile { flow_temperature: Celsius(55.0), ..Profile::default() };
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.effective_efficiency.0, 3.2, epsilon = 1e-12);
        assert_eq!(results.fan_effect, None);

        profile.optimizations.insert(Optimization::RadiatorFans);
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.effective_efficiency.0, 3.6, epsilon = 1e-12);
        assert_eq!(results.fan_effect, Some(Celsius(5.0)));
        Ok(())
    }

    #[test]
    fn test_consumption_based_gas() -> Result {
        let profile = Profile {
            method: Method::Consumption,
            heating_system: HeatingSystem::NaturalGasH,
            consumption: FuelAmount(2000.0),
            old_efficiency: Percentage(82.0),
            old_unit_price: FuelPrice(1.2),
            building_class: BuildingClass::Renovated,
            ..Profile::default()
        };
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.input_energy.0, 21_200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.useful_heat_demand.0, 17_384.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.old_system_cost.0, 2550.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.heat_pump_power.0, 17_384.0 / 2000.0 * 1.1, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_electric_heating_has_no_conversion_losses() -> Result {
        let profile = Profile {
            heating_system: HeatingSystem::Electricity,
            old_efficiency: Percentage(60.0),
            old_unit_price: FuelPrice(0.30),
            ..Profile::default()
        };
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.useful_heat_demand.0, results.input_energy.0);

        // 30000 kWh at 0.30 €/kWh + 150 €:
        assert_abs_diff_eq!(results.old_system_cost.0, 9150.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_consumption_based_electric_heating() -> Result {
        let profile = Profile {
            method: Method::Consumption,
            heating_system: HeatingSystem::Electricity,
            consumption: FuelAmount(8000.0),
            old_unit_price: FuelPrice(0.30),
            ..Profile::default()
        };
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.input_energy.0, 8000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.useful_heat_demand.0, 8000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.old_system_cost.0, 8000.0 * 0.30 + 150.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_low_calorific_gas_by_area() -> Result {
        let profile = Profile {
            heating_system: HeatingSystem::NaturalGasL,
            old_unit_price: FuelPrice(1.012),
            ..Profile::default()
        };
        let results = calculate(&profile)?;
        assert_abs_diff_eq!(results.input_energy.0, 30_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(results.useful_heat_demand.0, 24_000.0, epsilon = 1e-9);

        // 30000 kWh / 9.2 kWh/m³ × 1.012 €/m³ + 150 €:
        assert_abs_diff_eq!(results.old_system_cost.0, 3450.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_solar_thermal_offset_floors_at_zero() -> Result {
        let mut profile = Profile {
            building_class: BuildingClass::LowEnergy,
            area: SquareMeters(50.0),
            optimizations: Optimization::SolarThermal.into(),
            ..Profile::default()
        };
        profile.solar_thermal.area = SquareMeters(30.0);
        profile.solar_thermal.collector = CollectorType::EvacuatedTube;
        let results = calculate(&profile)?;
        assert_eq!(results.solar_thermal_yield, Some(KilowattHours(13_500.0)));
        assert_eq!(results.heat_pump_heat_demand, KilowattHours::ZERO);
        assert_eq!(results.heat_pump_electricity, KilowattHours::ZERO);
        Ok(())
    }

    #[test]
    fn test_photovoltaics_split_the_cost() -> Result {
        let mut profile =
            Profile { optimizations: Optimization::Photovoltaics.into(), ..Profile::default() };
        profile.photovoltaics.self_consumption = Percentage(40.0);
        profile.photovoltaics.price = KilowattHourPrice(0.08);
        let results = calculate(&profile)?;

        let photovoltaics = results.photovoltaics.context("PV summary is missing")?;
        assert_abs_diff_eq!(photovoltaics.self_supplied.0, 3000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(photovoltaics.grid_supplied.0, 4500.0, epsilon = 1e-6);
        assert_abs_diff_eq!(photovoltaics.annual_yield.0, 5000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            results.new_system_cost.0,
            4500.0 * 0.19 + 3000.0 * 0.08 + 250.0,
            epsilon = 1e-6,
        );

        // PV does not change the emissions:
        assert_abs_diff_eq!(results.new_system_co2.0, 900.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_amortization_immediate() -> Result {
        let profile = Profile { investment: Euros(5000.0), subsidy: Euros(8000.0), ..Profile::default() };
        let results = calculate(&profile)?;
        assert_eq!(results.effective_investment, Euros::ZERO);
        assert_eq!(results.amortization, Amortization::Immediate);
        Ok(())
    }

    #[test]
    fn test_amortization_never() -> Result {
        let profile = Profile {
            building_class: BuildingClass::LowEnergy,
            heating_system: HeatingSystem::Pellets,
            old_efficiency: Percentage::HUNDRED,
            old_unit_price: FuelPrice(0.15),
            old_maintenance: Euros::ZERO,
            grid_price: KilowattHourPrice(0.60),
            new_maintenance: Euros(500.0),
            subsidy: Euros(50_000.0),
            ..Profile::default()
        };
        let results = calculate(&profile)?;
        assert!(results.annual_savings < Euros::ZERO);
        assert_eq!(results.amortization, Amortization::Never);
        assert_abs_diff_eq!(results.forest_equivalent, 0.0);
        Ok(())
    }

    #[test]
    fn test_not_applicable_iff_new_build() -> Result {
        for heating_system in HeatingSystem::ALL {
            let profile = Profile::default().apply(
                &crate::core::cascade::Patch {
                    heating_system: Some(heating_system),
                    ..Default::default()
                },
                &Reference::default(),
            );
            let results = calculate(&profile)?;
            assert_eq!(
                results.amortization == Amortization::NotApplicable,
                heating_system.is_new_build(),
                "{heating_system:?}",
            );
        }
        Ok(())
    }

    #[test]
    fn test_old_unit_price_monotonicity() -> Result {
        let mut previous = Euros(f64::NEG_INFINITY);
        for price in [0.5, 0.8, 1.03, 1.5, 2.5] {
            let profile = Profile { old_unit_price: FuelPrice(price), ..Profile::default() };
            let cost = calculate(&profile)?.old_system_cost;
            assert!(cost >= previous, "{price}");
            previous = cost;
        }
        Ok(())
    }

    #[test]
    fn test_flow_temperature_monotonicity() -> Result {
        let mut previous = Scop(f64::INFINITY);
        for temperature in [30.0, 35.0, 42.5, 55.0, 60.0, 75.0] {
            let profile = Profile { flow_temperature: Celsius(temperature), ..Profile::default() };
            let scop = calculate(&profile)?.effective_efficiency;
            assert!(scop <= previous, "{temperature}");
            previous = scop;
        }
        Ok(())
    }

    #[test]
    fn test_idempotence() -> Result {
        let mut profile = Profile::default();
        profile.optimizations = Optimization::Photovoltaics | Optimization::RadiatorFans;
        let reference = Reference::default();
        let calculator = Calculator::try_new(&reference)?;
        assert_eq!(calculator.calculate(&profile)?, calculator.calculate(&profile)?);
        Ok(())
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let profile = Profile { area: SquareMeters(-1.0), ..Profile::default() };
        assert!(calculate(&profile).is_err());
    }

    #[test]
    fn test_non_positive_scop_rejected() {
        let mut reference = Reference::default();
        reference.scop_curve.high_temperature_scop = Scop(-1.0);
        let calculator = Calculator::try_new(&reference);
        assert!(calculator.is_ok_and(|calculator| calculator.calculate(&Profile::default()).is_err()));
    }
}
