//! Return periods and statutory due dates

pub mod period;

pub use period::*;
