use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Optional add-on installed together with the heat pump.
#[derive(Debug, Hash, Serialize, Deserialize, clap::ValueEnum, enumset::EnumSetType)]
#[serde(rename_all = "kebab-case")]
#[enumset(serialize_repr = "list")]
pub enum Optimization {
    /// Part of the heat pump's electricity comes from the own PV system.
    Photovoltaics,

    /// Collectors cover part of the heat demand.
    SolarThermal,

    /// Fans on the radiators allow for a lower flow temperature.
    RadiatorFans,
}

impl Display for Optimization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Photovoltaics => write!(f, "Photovoltaics"),
            Self::SolarThermal => write!(f, "Solar thermal"),
            Self::RadiatorFans => write!(f, "Radiator fans"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CollectorType {
    #[default]
    FlatPlate,
    EvacuatedTube,
}

impl Display for CollectorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlatPlate => write!(f, "Flat-plate collector"),
            Self::EvacuatedTube => write!(f, "Evacuated tube collector"),
        }
    }
}
