//! GSTR-1 and GSTR-3B summaries over a period's transactions
//!
//! Every generator is a single pass over `GstReportData::transactions` and
//! never mutates its input. All summaries are built from the same per-record
//! fields, so their totals agree with each other:
//!
//! - sum of record `total_value` == GSTR-1 `total_invoice_value`
//! - sum of rate-wise `total_tax` == GSTR-1 `total_tax` == sum of HSN-wise `total_tax`

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::GstConfig;
use crate::gstin::{is_valid_gstin, Gstin};
use crate::hsn::HsnRegistry;
use crate::reconciliation::reconcile_with_config;
use crate::returns::{ReturnPeriod, ReturnType};
use crate::traits::HsnLookup;
use crate::types::{GstError, GstRate, GstReportData, GstResult, TransactionRecord};
use crate::utils::zero;

/// Headline totals of a GSTR-1 return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gstr1Summary {
    pub total_taxable_value: BigDecimal,
    pub total_cgst: BigDecimal,
    pub total_sgst: BigDecimal,
    pub total_igst: BigDecimal,
    pub total_tax: BigDecimal,
    pub total_invoice_value: BigDecimal,
    /// Transactions with a valid customer GSTIN
    pub b2b_invoices: usize,
    /// All other transactions
    pub b2c_invoices: usize,
}

/// Totals for one GST slab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRateSummary {
    pub rate: GstRate,
    pub taxable_value: BigDecimal,
    pub cgst_amount: BigDecimal,
    pub sgst_amount: BigDecimal,
    pub igst_amount: BigDecimal,
    pub total_tax: BigDecimal,
}

/// Totals for one HSN code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsnSummary {
    pub hsn_code: String,
    pub description: String,
    pub quantity: BigDecimal,
    pub total_value: BigDecimal,
    pub taxable_value: BigDecimal,
    pub total_tax: BigDecimal,
}

/// Outward supply figures for table 3.1 of GSTR-3B
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gstr3bSummary {
    /// Taxable value of supplies above 0%
    pub outward_taxable_value: BigDecimal,
    pub integrated_tax: BigDecimal,
    pub central_tax: BigDecimal,
    pub state_tax: BigDecimal,
    /// Value of 0% supplies
    pub nil_rated_value: BigDecimal,
    pub total_tax: BigDecimal,
}

/// Every summary for one GSTIN and period, with filing deadlines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstReport {
    pub period: ReturnPeriod,
    pub gstin: Gstin,
    pub legal_name: String,
    pub gstr1: Gstr1Summary,
    pub rate_wise: Vec<TaxRateSummary>,
    pub hsn_wise: Vec<HsnSummary>,
    pub gstr3b: Gstr3bSummary,
    pub gstr1_due_date: NaiveDate,
    pub gstr3b_due_date: NaiveDate,
}

/// GSTR-1 headline totals and B2B/B2C counts
pub fn generate_gstr1_summary(data: &GstReportData) -> Gstr1Summary {
    let mut summary = Gstr1Summary {
        total_taxable_value: zero(),
        total_cgst: zero(),
        total_sgst: zero(),
        total_igst: zero(),
        total_tax: zero(),
        total_invoice_value: zero(),
        b2b_invoices: 0,
        b2c_invoices: 0,
    };

    for record in &data.transactions {
        summary.total_taxable_value += &record.taxable_value;
        summary.total_cgst += &record.cgst_amount;
        summary.total_sgst += &record.sgst_amount;
        summary.total_igst += &record.igst_amount;
        summary.total_tax += &record.total_tax;
        summary.total_invoice_value += &record.total_value;

        if is_b2b(record) {
            summary.b2b_invoices += 1;
        } else {
            summary.b2c_invoices += 1;
        }
    }

    debug!(
        period = %data.period,
        transactions = data.transactions.len(),
        b2b = summary.b2b_invoices,
        b2c = summary.b2c_invoices,
        "generated GSTR-1 summary"
    );

    summary
}

/// One bucket per slab present, ascending by rate
pub fn generate_tax_rate_wise_summary(data: &GstReportData) -> Vec<TaxRateSummary> {
    let mut buckets: BTreeMap<GstRate, TaxRateSummary> = BTreeMap::new();

    for record in &data.transactions {
        let bucket = buckets
            .entry(record.gst_rate)
            .or_insert_with(|| TaxRateSummary {
                rate: record.gst_rate,
                taxable_value: zero(),
                cgst_amount: zero(),
                sgst_amount: zero(),
                igst_amount: zero(),
                total_tax: zero(),
            });

        bucket.taxable_value += &record.taxable_value;
        bucket.cgst_amount += &record.cgst_amount;
        bucket.sgst_amount += &record.sgst_amount;
        bucket.igst_amount += &record.igst_amount;
        bucket.total_tax += &record.total_tax;
    }

    buckets.into_values().collect()
}

/// One bucket per HSN code, ascending by code
///
/// Descriptions come from `lookup`, falling back to "Unknown". A record
/// without a quantity counts as one unit.
pub fn generate_hsn_wise_summary<L>(data: &GstReportData, lookup: &L) -> Vec<HsnSummary>
where
    L: HsnLookup + ?Sized,
{
    let mut buckets: BTreeMap<&str, HsnSummary> = BTreeMap::new();

    for record in &data.transactions {
        let bucket = buckets
            .entry(record.hsn_code.as_str())
            .or_insert_with(|| HsnSummary {
                hsn_code: record.hsn_code.clone(),
                description: lookup.describe(&record.hsn_code).to_string(),
                quantity: zero(),
                total_value: zero(),
                taxable_value: zero(),
                total_tax: zero(),
            });

        match &record.quantity {
            Some(quantity) => bucket.quantity += quantity,
            None => bucket.quantity += BigDecimal::from(1),
        }
        bucket.total_value += &record.total_value;
        bucket.taxable_value += &record.taxable_value;
        bucket.total_tax += &record.total_tax;
    }

    buckets.into_values().collect()
}

/// GSTR-3B outward supply totals, separating nil-rated supplies
pub fn generate_gstr3b_summary(data: &GstReportData) -> Gstr3bSummary {
    let mut summary = Gstr3bSummary {
        outward_taxable_value: zero(),
        integrated_tax: zero(),
        central_tax: zero(),
        state_tax: zero(),
        nil_rated_value: zero(),
        total_tax: zero(),
    };

    for record in &data.transactions {
        if record.gst_rate.is_nil() {
            summary.nil_rated_value += &record.taxable_value;
            continue;
        }

        summary.outward_taxable_value += &record.taxable_value;
        summary.integrated_tax += &record.igst_amount;
        summary.central_tax += &record.cgst_amount;
        summary.state_tax += &record.sgst_amount;
        summary.total_tax += &record.total_tax;
    }

    summary
}

fn is_b2b(record: &TransactionRecord) -> bool {
    record
        .customer_gstin
        .as_deref()
        .is_some_and(is_valid_gstin)
}

/// Report generator over shared HSN reference data
///
/// Holds the lookup behind an `Arc`, so one generator (or clones of it) can
/// serve report requests from many threads.
#[derive(Debug)]
pub struct ReportGenerator<L: HsnLookup = HsnRegistry> {
    lookup: Arc<L>,
    config: GstConfig,
}

impl<L: HsnLookup> Clone for ReportGenerator<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            config: self.config.clone(),
        }
    }
}

impl<L: HsnLookup> ReportGenerator<L> {
    /// Create a report generator with the default configuration
    pub fn new(lookup: Arc<L>) -> Self {
        Self::with_config(lookup, GstConfig::default())
    }

    pub fn with_config(lookup: Arc<L>, config: GstConfig) -> Self {
        Self { lookup, config }
    }

    pub fn generate_gstr1_summary(&self, data: &GstReportData) -> Gstr1Summary {
        generate_gstr1_summary(data)
    }

    pub fn generate_tax_rate_wise_summary(&self, data: &GstReportData) -> Vec<TaxRateSummary> {
        generate_tax_rate_wise_summary(data)
    }

    pub fn generate_hsn_wise_summary(&self, data: &GstReportData) -> Vec<HsnSummary> {
        generate_hsn_wise_summary(data, self.lookup.as_ref())
    }

    pub fn generate_gstr3b_summary(&self, data: &GstReportData) -> Gstr3bSummary {
        generate_gstr3b_summary(data)
    }

    /// Build every summary for a period
    ///
    /// Unlike the individual generators this checks the header: the period
    /// must be valid under the configuration and the supplier GSTIN must pass
    /// validation.
    pub fn generate_report(&self, data: &GstReportData) -> GstResult<GstReport> {
        let period = ReturnPeriod::parse(&data.period, &self.config)?;
        let gstin = Gstin::parse(&data.gstin)?;

        let gstr1_due_date = self.due_date(&period, ReturnType::Gstr1)?;
        let gstr3b_due_date = self.due_date(&period, ReturnType::Gstr3B)?;

        Ok(GstReport {
            period,
            gstin,
            legal_name: data.legal_name.clone(),
            gstr1: self.generate_gstr1_summary(data),
            rate_wise: self.generate_tax_rate_wise_summary(data),
            hsn_wise: self.generate_hsn_wise_summary(data),
            gstr3b: self.generate_gstr3b_summary(data),
            gstr1_due_date,
            gstr3b_due_date,
        })
    }

    /// Check the records agree with themselves and the period is valid
    pub fn reconcile(&self, data: &GstReportData) -> GstResult<()> {
        reconcile_with_config(data, &self.config)
    }

    fn due_date(&self, period: &ReturnPeriod, return_type: ReturnType) -> GstResult<NaiveDate> {
        period.due_date(return_type, &self.config).ok_or_else(|| {
            GstError::InvalidPeriod(format!("no {} due date for {}", return_type, period))
        })
    }
}
