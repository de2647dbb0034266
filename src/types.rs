//! Core types and data structures for the GST engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gstin::GstinError;

/// GST rate slabs notified under the GST Act
///
/// The set is closed: an integer percentage outside it is rejected at the
/// boundary by [`GstRate::from_percent`] instead of flowing through as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GstRate {
    /// Nil rated / exempt items (fresh produce, milk, etc.) - 0%
    Zero,
    /// Essential goods - 5%
    Five,
    /// Standard rate - 12%
    Twelve,
    /// Standard rate - 18%
    Eighteen,
    /// Luxury/Sin goods - 28%
    TwentyEight,
}

impl GstRate {
    /// All slabs in ascending order
    pub const ALL: [GstRate; 5] = [
        GstRate::Zero,
        GstRate::Five,
        GstRate::Twelve,
        GstRate::Eighteen,
        GstRate::TwentyEight,
    ];

    /// Integer percentage of this slab
    pub fn percent(&self) -> u8 {
        match self {
            GstRate::Zero => 0,
            GstRate::Five => 5,
            GstRate::Twelve => 12,
            GstRate::Eighteen => 18,
            GstRate::TwentyEight => 28,
        }
    }

    /// Look up the slab for an integer percentage
    pub fn from_percent(percent: u8) -> GstResult<Self> {
        match percent {
            0 => Ok(GstRate::Zero),
            5 => Ok(GstRate::Five),
            12 => Ok(GstRate::Twelve),
            18 => Ok(GstRate::Eighteen),
            28 => Ok(GstRate::TwentyEight),
            other => Err(GstError::UnsupportedRate(format!(
                "{}% is not a GST slab (expected one of 0, 5, 12, 18, 28)",
                other
            ))),
        }
    }

    /// Full rate as a decimal percentage
    pub fn as_decimal(&self) -> BigDecimal {
        BigDecimal::from(self.percent())
    }

    /// CGST or SGST share of the rate (half of the full rate, e.g. 2.5 for 5%)
    pub fn half_rate(&self) -> BigDecimal {
        self.as_decimal() / BigDecimal::from(2)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, GstRate::Zero)
    }
}

impl TryFrom<u8> for GstRate {
    type Error = GstError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GstRate::from_percent(value)
    }
}

impl From<GstRate> for u8 {
    fn from(rate: GstRate) -> Self {
        rate.percent()
    }
}

impl fmt::Display for GstRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// One row of the HSN tariff table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsnCodeEntry {
    /// Tariff code, 2 to 8 digits
    pub code: String,
    /// Human-readable product category
    pub description: String,
    /// Applicable GST slab
    pub gst_rate: GstRate,
    /// Two-digit tariff chapter
    pub chapter: String,
    /// Tariff section (roman numeral)
    pub section: String,
    /// Colloquial and local-language names used for product name suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl HsnCodeEntry {
    /// Create an entry without keywords
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        gst_rate: GstRate,
        chapter: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            gst_rate,
            chapter: chapter.into(),
            section: section.into(),
            keywords: Vec::new(),
        }
    }

    /// Attach keywords to an entry
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// Order line handed to the tax calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    /// Value on which tax is levied
    pub taxable_value: BigDecimal,
    /// Applicable GST slab
    pub gst_rate: GstRate,
    /// HSN code of the product
    pub hsn_code: String,
    /// Units sold, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<BigDecimal>,
}

impl TaxLine {
    /// Create a line from its taxable value
    pub fn new(taxable_value: BigDecimal, gst_rate: GstRate, hsn_code: impl Into<String>) -> Self {
        Self {
            taxable_value,
            gst_rate,
            hsn_code: hsn_code.into(),
            quantity: None,
        }
    }

    /// Create a line from quantity and unit price (taxable value = quantity x unit price)
    pub fn from_unit_price(
        quantity: BigDecimal,
        unit_price: BigDecimal,
        gst_rate: GstRate,
        hsn_code: impl Into<String>,
    ) -> Self {
        Self {
            taxable_value: &quantity * &unit_price,
            gst_rate,
            hsn_code: hsn_code.into(),
            quantity: Some(quantity),
        }
    }
}

/// Tax breakdown for one taxable value
///
/// Exactly one of (CGST + SGST) or IGST carries a non-zero amount, and
/// `cgst_amount + sgst_amount + igst_amount == total_tax` holds exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSplit {
    /// Value the split was computed on
    pub taxable_value: BigDecimal,
    pub cgst_rate: BigDecimal,
    pub cgst_amount: BigDecimal,
    pub sgst_rate: BigDecimal,
    pub sgst_amount: BigDecimal,
    pub igst_rate: BigDecimal,
    pub igst_amount: BigDecimal,
    /// CGST + SGST + IGST
    pub total_tax: BigDecimal,
    /// Taxable value + total tax
    pub total_value: BigDecimal,
}

/// One invoice as reported in a GST return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    /// Buyer's GSTIN; absent for walk-in consumers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_gstin: Option<String>,
    pub customer_name: String,
    pub hsn_code: String,
    /// Units sold; reports count one unit per invoice when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<BigDecimal>,
    pub gst_rate: GstRate,
    pub taxable_value: BigDecimal,
    pub cgst_rate: BigDecimal,
    pub cgst_amount: BigDecimal,
    pub sgst_rate: BigDecimal,
    pub sgst_amount: BigDecimal,
    pub igst_rate: BigDecimal,
    pub igst_amount: BigDecimal,
    pub total_tax: BigDecimal,
    pub total_value: BigDecimal,
}

/// Invoice header fields for building a [`TransactionRecord`]
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceHeader {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub customer_gstin: Option<String>,
    pub customer_name: String,
}

impl TransactionRecord {
    /// Build a record from an invoice header and a computed split
    pub fn from_split(
        header: InvoiceHeader,
        hsn_code: impl Into<String>,
        quantity: Option<BigDecimal>,
        gst_rate: GstRate,
        split: TaxSplit,
    ) -> Self {
        Self {
            invoice_number: header.invoice_number,
            invoice_date: header.invoice_date,
            customer_gstin: header.customer_gstin,
            customer_name: header.customer_name,
            hsn_code: hsn_code.into(),
            quantity,
            gst_rate,
            taxable_value: split.taxable_value,
            cgst_rate: split.cgst_rate,
            cgst_amount: split.cgst_amount,
            sgst_rate: split.sgst_rate,
            sgst_amount: split.sgst_amount,
            igst_rate: split.igst_rate,
            igst_amount: split.igst_amount,
            total_tax: split.total_tax,
            total_value: split.total_value,
        }
    }
}

/// Input to the report generator: one GSTIN's outward supplies for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstReportData {
    /// Return period in `MMYYYY` form
    pub period: String,
    /// Supplier GSTIN
    pub gstin: String,
    pub legal_name: String,
    pub transactions: Vec<TransactionRecord>,
}

/// Broad category of a [`GstError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-policy input
    Validation,
    /// Direct lookup of an unknown key
    NotFound,
}

/// Errors produced by the GST engine
#[derive(Debug, thiserror::Error)]
pub enum GstError {
    #[error("Invalid GSTIN: {0}")]
    InvalidGstin(#[from] GstinError),
    #[error("Invalid return period: {0}")]
    InvalidPeriod(String),
    #[error("Taxable value cannot be negative: {0}")]
    NegativeTaxableValue(BigDecimal),
    #[error("Unsupported GST rate: {0}")]
    UnsupportedRate(String),
    #[error("Invalid HSN code: {0}")]
    InvalidHsnCode(String),
    #[error("HSN code not found: {0}")]
    HsnNotFound(String),
    #[error("Buyer state could not be determined")]
    MissingBuyerState,
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Reconciliation error: {0}")]
    Reconciliation(String),
    #[error("Malformed data: {0}")]
    Json(#[from] serde_json::Error),
}

impl GstError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GstError::HsnNotFound(_) => ErrorKind::NotFound,
            GstError::InvalidGstin(_)
            | GstError::InvalidPeriod(_)
            | GstError::NegativeTaxableValue(_)
            | GstError::UnsupportedRate(_)
            | GstError::InvalidHsnCode(_)
            | GstError::MissingBuyerState
            | GstError::Configuration(_)
            | GstError::Reconciliation(_)
            | GstError::Json(_) => ErrorKind::Validation,
        }
    }
}

/// Result type for GST operations
pub type GstResult<T> = Result<T, GstError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_percent_round_trip() {
        for rate in GstRate::ALL {
            assert_eq!(GstRate::from_percent(rate.percent()).unwrap(), rate);
        }
    }

    #[test]
    fn test_unsupported_rate() {
        let err = GstRate::from_percent(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("7%"));
    }

    #[test]
    fn test_half_rate() {
        assert_eq!(GstRate::Five.half_rate(), "2.5".parse::<BigDecimal>().unwrap());
        assert_eq!(GstRate::TwentyEight.half_rate(), BigDecimal::from(14));
    }

    #[test]
    fn test_rate_serializes_as_number() {
        let json = serde_json::to_string(&GstRate::Eighteen).unwrap();
        assert_eq!(json, "18");
        let rate: GstRate = serde_json::from_str("12").unwrap();
        assert_eq!(rate, GstRate::Twelve);
        assert!(serde_json::from_str::<GstRate>("15").is_err());
    }

    #[test]
    fn test_tax_line_from_unit_price() {
        let line = TaxLine::from_unit_price(
            BigDecimal::from(3),
            "49.50".parse().unwrap(),
            GstRate::Five,
            "1006",
        );
        assert_eq!(line.taxable_value, "148.50".parse::<BigDecimal>().unwrap());
        assert_eq!(line.quantity, Some(BigDecimal::from(3)));
    }

    #[test]
    fn test_not_found_kind() {
        assert_eq!(
            GstError::HsnNotFound("9999".to_string()).kind(),
            ErrorKind::NotFound
        );
    }
}
