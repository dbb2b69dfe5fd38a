use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use serde::{Deserialize, Serialize};

use crate::quantity::energy::KilowattHours;

/// Seasonal coefficient of performance: delivered heat over consumed electricity.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize, derive_more::FromStr)]
#[serde(transparent)]
pub struct Scop(pub f64);

impl Display for Scop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Debug for Scop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SCOP {:?}", self.0)
    }
}

impl Div<Scop> for KilowattHours {
    type Output = Self;

    fn div(self, scop: Scop) -> Self::Output {
        Self(self.0 / scop.0)
    }
}
