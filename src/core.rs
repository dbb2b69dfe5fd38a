pub mod building;
pub mod calculator;
pub mod cascade;
pub mod heating;
pub mod optimization;
pub mod profile;
pub mod results;
