use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Building energy standard, from an unrenovated old building to a low-energy house.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingClass {
    Unrenovated,
    PartiallyRenovated,
    Renovated,
    NewBuild,
    LowEnergy,
}

impl BuildingClass {
    pub const ALL: [Self; 5] = [
        Self::Unrenovated,
        Self::PartiallyRenovated,
        Self::Renovated,
        Self::NewBuild,
        Self::LowEnergy,
    ];
}

impl Display for BuildingClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrenovated => write!(f, "Old, unrenovated"),
            Self::PartiallyRenovated => write!(f, "Old, partially renovated"),
            Self::Renovated => write!(f, "Old, renovated"),
            Self::NewBuild => write!(f, "New building"),
            Self::LowEnergy => write!(f, "Low-energy house"),
        }
    }
}
