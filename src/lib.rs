#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod cli;
pub mod core;
pub mod narrative;
pub mod ops;
pub mod prelude;
pub mod quantity;
pub mod reference;
pub mod report;
pub mod tables;
