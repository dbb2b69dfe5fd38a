use enumset::EnumSet;
use serde::Serialize;

use crate::{
    core::{
        building::BuildingClass,
        heating::{HeatingSystem, Method},
        optimization::Optimization,
        profile::Profile,
        results::{Amortization, Results},
    },
    quantity::time::Years,
};

/// Rounded summary of a calculation, which is all the narrator gets to see.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub input: InputSummary,
    pub results: ResultsSummary,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InputSummary {
    pub method: Method,

    /// Square meters.
    pub area: f64,

    pub building_class: BuildingClass,
    pub old_system: HeatingSystem,
    pub optimizations: EnumSet<Optimization>,

    /// Euros.
    pub investment: f64,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResultsSummary {
    /// Kilowatts, to 0.1.
    pub heat_pump_power: f64,

    /// Euros per year, whole.
    pub annual_savings: f64,

    /// Kilograms per year, whole.
    pub annual_co2_savings: f64,

    /// Years to 0.1, or the sentinel.
    pub amortization: Amortization,
}

impl Snapshot {
    pub fn new(profile: &Profile, results: &Results) -> Self {
        Self {
            input: InputSummary {
                method: profile.method,
                area: profile.area.0,
                building_class: profile.building_class,
                old_system: profile.heating_system,
                optimizations: profile.optimizations,
                investment: profile.investment.0,
            },
            results: ResultsSummary {
                heat_pump_power: round_to(results.heat_pump_power.0, 1),
                annual_savings: round_to(results.annual_savings.0, 0),
                annual_co2_savings: round_to(results.annual_co2_savings.0, 0),
                amortization: match results.amortization {
                    Amortization::Years(years) => Amortization::Years(Years(round_to(years.0, 1))),
                    sentinel => sentinel,
                },
            },
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
