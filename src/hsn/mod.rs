//! HSN tariff classification

pub mod data;
pub mod registry;

pub use data::*;
pub use registry::*;
