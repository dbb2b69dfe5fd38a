//! Defaults cascade: editing a profile with a patch, while keeping the dependent fields consistent.

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        building::BuildingClass,
        heating::{HeatingSystem, Method},
        optimization::{CollectorType, Optimization},
        profile::Profile,
    },
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

/// Partial edit of a [`Profile`]: every field which is set overwrites the previous value.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, clap::Args)]
#[serde(default, rename_all = "kebab-case")]
pub struct Patch {
    /// Heat demand estimation method.
    #[clap(long, value_enum)]
    pub method: Option<Method>,

    /// Annual consumption in the fuel unit of the heating system.
    #[clap(long)]
    pub consumption: Option<FuelAmount>,

    /// Heated floor area, m².
    #[clap(long)]
    pub area: Option<SquareMeters>,

    #[clap(long, value_enum)]
    pub building_class: Option<BuildingClass>,

    #[clap(long, value_enum)]
    pub heating_system: Option<HeatingSystem>,

    /// Annual efficiency of the old system, %.
    #[clap(long)]
    pub old_efficiency: Option<Percentage>,

    /// Price per fuel unit of the old system, €.
    #[clap(long)]
    pub old_unit_price: Option<FuelPrice>,

    /// Grid electricity price, €/kWh.
    #[clap(long)]
    pub grid_price: Option<KilowattHourPrice>,

    /// Floor heating share, %.
    #[clap(long)]
    pub floor_heating_share: Option<Percentage>,

    /// Flow temperature, °C.
    #[clap(long)]
    pub flow_temperature: Option<Celsius>,

    /// Replaces the whole set of optimizations. An empty value clears it.
    #[clap(long, value_enum, value_delimiter = ',', num_args = 0..)]
    pub optimizations: Option<Vec<Optimization>>,

    /// Installed PV peak power, kWp.
    #[clap(long)]
    pub pv_capacity: Option<Kilowatts>,

    /// Share of the heat pump electricity covered by PV, %.
    #[clap(long)]
    pub pv_self_consumption: Option<Percentage>,

    /// Cost of the self-consumed PV electricity, €/kWh.
    #[clap(long)]
    pub pv_price: Option<KilowattHourPrice>,

    /// Solar thermal collector area, m².
    #[clap(long)]
    pub collector_area: Option<SquareMeters>,

    #[clap(long, value_enum)]
    pub collector_type: Option<CollectorType>,

    /// Heat pump investment, €.
    #[clap(long)]
    pub investment: Option<Euros>,

    /// Subsidy, €.
    #[clap(long)]
    pub subsidy: Option<Euros>,

    /// Annual maintenance of the old system, €.
    #[clap(long)]
    pub old_maintenance: Option<Euros>,

    /// Annual maintenance of the heat pump, €.
    #[clap(long)]
    pub new_maintenance: Option<Euros>,
}

impl Profile {
    /// Apply the patch and the dependent defaults, returning the new profile.
    ///
    /// The previous profile is left untouched.
    pub fn apply(&self, patch: &Patch, reference: &Reference) -> Self {
        let mut next = self.clone();

        merge(&mut next.method, patch.method);
        merge(&mut next.consumption, patch.consumption);
        merge(&mut next.area, patch.area);
        merge(&mut next.building_class, patch.building_class);
        merge(&mut next.heating_system, patch.heating_system);
        merge(&mut next.old_efficiency, patch.old_efficiency);
        merge(&mut next.old_unit_price, patch.old_unit_price);
        merge(&mut next.grid_price, patch.grid_price);
        merge(&mut next.floor_heating_share, patch.floor_heating_share);
        merge(&mut next.flow_temperature, patch.flow_temperature);
        if let Some(optimizations) = &patch.optimizations {
            next.optimizations = optimizations.iter().copied().collect::<EnumSet<_>>();
        }
        merge(&mut next.photovoltaics.capacity, patch.pv_capacity);
        merge(&mut next.photovoltaics.self_consumption, patch.pv_self_consumption);
        merge(&mut next.photovoltaics.price, patch.pv_price);
        merge(&mut next.solar_thermal.area, patch.collector_area);
        merge(&mut next.solar_thermal.collector, patch.collector_type);
        merge(&mut next.investment, patch.investment);
        merge(&mut next.subsidy, patch.subsidy);
        merge(&mut next.old_maintenance, patch.old_maintenance);
        merge(&mut next.new_maintenance, patch.new_maintenance);

        // A new build has no consumption to measure.
        if next.heating_system.is_new_build() {
            next.method = Method::Area;
        }

        if let Some(building_class) = patch.building_class {
            let emitter_defaults = reference.emitter_defaults.get(building_class);
            next.floor_heating_share = emitter_defaults.floor_heating_share;
            next.flow_temperature = emitter_defaults.flow_temperature;
        }

        if let Some(heating_system) = patch.heating_system
            && heating_system != self.heating_system
        {
            if patch.old_efficiency.is_none() {
                next.old_efficiency = reference.default_efficiency(heating_system);
            }
            if patch.old_unit_price.is_none() {
                next.old_unit_price = reference.default_price(heating_system);
            }
        }

        next
    }
}

fn merge<T>(value: &mut T, patch: Option<T>) {
    if let Some(patch) = patch {
        *value = patch;
    }
}
