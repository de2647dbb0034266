//! Consistency checks for report input
//!
//! Summaries are pure reducers and will total whatever they are given. These
//! checks catch records whose stored amounts disagree with each other before
//! they reach a return.

use bigdecimal::{BigDecimal, Zero};
use tracing::warn;

use crate::config::GstConfig;
use crate::returns::ReturnPeriod;
use crate::types::{GstError, GstReportData, GstResult, TransactionRecord};

/// Problems found in a single transaction record
pub fn check_record(record: &TransactionRecord) -> Vec<String> {
    let mut problems = Vec::new();

    if record.taxable_value < BigDecimal::zero() {
        problems.push(format!("negative taxable value {}", record.taxable_value));
    }

    let heads = &record.cgst_amount + &record.sgst_amount + &record.igst_amount;
    if heads != record.total_tax {
        problems.push(format!(
            "tax heads sum to {} but total tax is {}",
            heads, record.total_tax
        ));
    }

    let expected_total = &record.taxable_value + &record.total_tax;
    if expected_total != record.total_value {
        problems.push(format!(
            "taxable value plus tax is {} but total value is {}",
            expected_total, record.total_value
        ));
    }

    let intrastate = !record.cgst_amount.is_zero() || !record.sgst_amount.is_zero();
    if intrastate && !record.igst_amount.is_zero() {
        problems.push("both CGST/SGST and IGST charged".to_string());
    }

    problems
}

/// Check every record and the period under the default configuration
pub fn reconcile(data: &GstReportData) -> GstResult<()> {
    reconcile_with_config(data, &GstConfig::default())
}

/// Check every record and the period
///
/// All mismatches are logged. The error lists each offending invoice.
pub fn reconcile_with_config(data: &GstReportData, config: &GstConfig) -> GstResult<()> {
    ReturnPeriod::parse(&data.period, config)?;

    let mut failures = Vec::new();
    for record in &data.transactions {
        for problem in check_record(record) {
            warn!(
                invoice = %record.invoice_number,
                hsn = %record.hsn_code,
                %problem,
                "transaction record does not reconcile"
            );
            failures.push(format!("{}: {}", record.invoice_number, problem));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(GstError::Reconciliation(failures.join("; ")))
    }
}
