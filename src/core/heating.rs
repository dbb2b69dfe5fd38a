use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// How the current heat demand gets estimated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// From the heated floor area and the building class.
    #[default]
    Area,

    /// From the measured annual fuel consumption.
    Consumption,
}

/// The heating system being replaced.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeatingSystem {
    Oil,
    NaturalGasH,
    NaturalGasL,
    Lpg,
    Pellets,
    Electricity,

    /// Nothing to replace: a new build.
    None,
}

impl HeatingSystem {
    pub const ALL: [Self; 7] = [
        Self::Oil,
        Self::NaturalGasH,
        Self::NaturalGasL,
        Self::Lpg,
        Self::Pellets,
        Self::Electricity,
        Self::None,
    ];

    #[must_use]
    pub const fn is_new_build(self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether the system converts its fuel with losses, so that its efficiency matters.
    #[must_use]
    pub const fn has_conversion_losses(self) -> bool {
        !matches!(self, Self::Electricity | Self::None)
    }

    /// Unit in which the fuel is bought and metered.
    #[must_use]
    pub const fn fuel_unit(self) -> &'static str {
        match self {
            Self::Oil | Self::Lpg => "l",
            Self::NaturalGasH | Self::NaturalGasL => "m³",
            Self::Pellets => "kg",
            Self::Electricity => "kWh",
            Self::None => "",
        }
    }
}

impl Display for HeatingSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oil => write!(f, "Heating oil"),
            Self::NaturalGasH => write!(f, "Natural gas (H)"),
            Self::NaturalGasL => write!(f, "Natural gas (L)"),
            Self::Lpg => write!(f, "LPG"),
            Self::Pellets => write!(f, "Wood pellets"),
            Self::Electricity => write!(f, "Electricity"),
            Self::None => write!(f, "None (new build)"),
        }
    }
}
