//! # GST Core
//!
//! Indian Goods and Services Tax compliance for retail businesses: product
//! classification, GSTIN validation, tax computation, return periods, and
//! return summaries.
//!
//! ## Features
//!
//! - **HSN registry**: Built-in tariff table with code lookup, description search, and product suggestions
//! - **GSTIN validation**: Structural checks, the mod-36 check character, and state resolution
//! - **Tax calculation**: CGST/SGST/IGST splits, invoices, and tax-inclusive reverse calculation
//! - **Return periods**: `MMYYYY` periods, GSTR-1 and GSTR-3B due dates, overdue checks
//! - **Reports**: GSTR-1, rate-wise, HSN-wise, and GSTR-3B summaries with reconciliation checks
//!
//! ## Quick Start
//!
//! ```rust
//! use gst_core::{compute_split, is_interstate_transaction, GstRate};
//! use bigdecimal::BigDecimal;
//!
//! let interstate = is_interstate_transaction("27AABCU9603R1ZN", Some("07AABCU9603R1ZP"));
//! let split = compute_split(&BigDecimal::from(1000), GstRate::Eighteen, interstate).unwrap();
//!
//! assert_eq!(split.igst_amount, BigDecimal::from(180));
//! assert_eq!(split.total_value, BigDecimal::from(1180));
//! ```

pub mod config;
pub mod gstin;
pub mod hsn;
pub mod reconciliation;
pub mod reports;
pub mod returns;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use gstin::*;
pub use hsn::*;
pub use reconciliation::*;
pub use reports::*;
pub use returns::*;
pub use tax::gst::*;
pub use traits::*;
pub use types::*;
