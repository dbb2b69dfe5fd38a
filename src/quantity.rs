//! Typed quantities used throughout the calculation.
//!
//! Every quantity is an `f64` newtype with a total order, so that they can be compared, sorted
//! and used as keys. Only the physically meaningful products and ratios are implemented.

#[macro_use]
mod macros;

pub mod area;
pub mod currency;
pub mod efficiency;
pub mod emissions;
pub mod energy;
pub mod fuel;
pub mod power;
pub mod price;
pub mod ratios;
pub mod temperature;
pub mod time;
