//! GST return summaries

pub mod summary;

pub use summary::*;
