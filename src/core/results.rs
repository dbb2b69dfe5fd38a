use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::quantity::{
    currency::Euros,
    efficiency::Scop,
    emissions::Kilograms,
    energy::KilowattHours,
    power::Kilowatts,
    temperature::Celsius,
    time::Years,
};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Results {
    /// Final energy consumed by the old system, zero for a new build.
    pub input_energy: KilowattHours,

    /// Heat the building actually needs per year.
    pub useful_heat_demand: KilowattHours,

    /// Annual fuel cost and maintenance of the old system.
    pub old_system_cost: Euros,

    pub old_system_co2: Kilograms,

    /// Sized heat pump power, including the margin.
    pub heat_pump_power: Kilowatts,

    /// Seasonal COP at the effective flow temperature.
    pub effective_efficiency: Scop,

    /// Flow temperature reduction by radiator fans, if installed.
    pub fan_effect: Option<Celsius>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_thermal_yield: Option<KilowattHours>,

    /// Heat which the heat pump has to deliver after the solar thermal offset.
    pub heat_pump_heat_demand: KilowattHours,

    pub heat_pump_electricity: KilowattHours,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub photovoltaics: Option<PhotovoltaicsSummary>,

    pub new_system_cost: Euros,
    pub new_system_co2: Kilograms,
    pub annual_savings: Euros,
    pub annual_co2_savings: Kilograms,

    /// Football fields of forest absorbing the same CO₂ per year.
    pub forest_equivalent: f64,

    /// Investment after the subsidy, never negative.
    pub effective_investment: Euros,

    pub amortization: Amortization,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PhotovoltaicsSummary {
    /// Annual yield of the PV system.
    pub annual_yield: KilowattHours,

    /// Heat pump electricity covered by the PV system.
    pub self_supplied: KilowattHours,

    /// Heat pump electricity bought from the grid.
    pub grid_supplied: KilowattHours,
}

/// Payback of the effective investment.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Amortization {
    /// The savings repay the effective investment in the given time.
    Years(Years),

    /// Nothing to repay, and the heat pump saves money.
    Immediate,

    /// The heat pump saves nothing, so it never pays back.
    Never,

    /// A new build has nothing to compare against.
    NotApplicable,
}

impl Amortization {
    const IMMEDIATE: &'static str = "immediate";
    const NEVER: &'static str = "none";
    const NOT_APPLICABLE: &'static str = "not-applicable";

    #[must_use]
    pub const fn years(self) -> Option<Years> {
        match self {
            Self::Years(years) => Some(years),
            Self::Immediate | Self::Never | Self::NotApplicable => None,
        }
    }
}

impl Display for Amortization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{years}"),
            Self::Immediate => write!(f, "immediate"),
            Self::Never => write!(f, "never"),
            Self::NotApplicable => write!(f, "n/a"),
        }
    }
}

impl Serialize for Amortization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Years(years) => serializer.serialize_f64(years.0),
            Self::Immediate => serializer.serialize_str(Self::IMMEDIATE),
            Self::Never => serializer.serialize_str(Self::NEVER),
            Self::NotApplicable => serializer.serialize_str(Self::NOT_APPLICABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Amortization {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Years(f64),
            Sentinel(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Years(years) => Ok(Self::Years(Years(years))),
            Raw::Sentinel(sentinel) => match sentinel.as_str() {
                Self::IMMEDIATE => Ok(Self::Immediate),
                Self::NEVER => Ok(Self::Never),
                Self::NOT_APPLICABLE => Ok(Self::NotApplicable),
                _ => Err(serde::de::Error::unknown_variant(
                    &sentinel,
                    &[Self::IMMEDIATE, Self::NEVER, Self::NOT_APPLICABLE],
                )),
            },
        }
    }
}
