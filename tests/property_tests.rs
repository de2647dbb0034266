//! Property tests for GSTIN checksums, tax splits, and report totals
//!
//! Uses proptest to check invariants that must hold for every input, not
//! just the worked examples in the unit tests.

use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::{Datelike, NaiveDate};
use gst_core::{
    compute_checksum, generate_gstr1_summary, generate_tax_rate_wise_summary, reconcile,
    validate_gstin, GstConfig, GstRate, GstReportData, HsnRegistry, InvoiceHeader,
    ReportGenerator, ReturnPeriod, ReturnType, TaxCalculator, TransactionRecord, STATE_CODES,
};
use proptest::prelude::*;

const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ── Strategies ──────────────────────────────────────────────────────────────

/// A GSTIN that passes every check
fn arb_gstin() -> impl Strategy<Value = String> {
    let states: Vec<&'static str> = STATE_CODES.iter().map(|(code, _)| *code).collect();
    (
        prop::sample::select(states),
        "[A-Z]{5}[0-9]{4}[A-Z][1-9]",
    )
        .prop_map(|(state, rest)| {
            let first14 = format!("{state}{rest}Z");
            let check = compute_checksum(&first14).unwrap();
            format!("{first14}{check}")
        })
}

/// Amounts from 0.00 to 9,999,999.99
fn arb_amount() -> impl Strategy<Value = BigDecimal> {
    (0i64..1_000_000_000i64).prop_map(|paise| BigDecimal::new(paise.into(), 2))
}

fn arb_rate() -> impl Strategy<Value = GstRate> {
    prop::sample::select(GstRate::ALL.to_vec())
}

fn arb_record() -> impl Strategy<Value = (BigDecimal, GstRate, bool)> {
    (arb_amount(), arb_rate(), any::<bool>())
}

fn to_record(
    index: usize,
    taxable: &BigDecimal,
    rate: GstRate,
    interstate: bool,
) -> TransactionRecord {
    let split = TaxCalculator::default()
        .compute_split(taxable, rate, interstate)
        .unwrap();
    TransactionRecord::from_split(
        InvoiceHeader {
            invoice_number: format!("INV-{index:04}"),
            invoice_date: NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            customer_gstin: None,
            customer_name: "Walk-in".to_string(),
        },
        "1905",
        None,
        rate,
        split,
    )
}

fn report_data(records: &[(BigDecimal, GstRate, bool)]) -> GstReportData {
    GstReportData {
        period: "112024".to_string(),
        gstin: "27AABCU9603R1ZN".to_string(),
        legal_name: "Property Traders".to_string(),
        transactions: records
            .iter()
            .enumerate()
            .map(|(i, (taxable, rate, interstate))| to_record(i, taxable, *rate, *interstate))
            .collect(),
    }
}

proptest! {
    #[test]
    fn test_generated_gstin_is_valid(gstin in arb_gstin()) {
        let result = validate_gstin(&gstin);
        prop_assert!(result.is_valid, "{} rejected: {:?}", gstin, result.error);
    }

    #[test]
    fn test_single_substitution_detected(
        gstin in arb_gstin(),
        position in 0usize..15,
        replacement in prop::sample::select(ALPHABET.chars().collect::<Vec<_>>()),
    ) {
        let mut chars: Vec<char> = gstin.chars().collect();
        prop_assume!(chars[position] != replacement);
        chars[position] = replacement;
        let mutated: String = chars.into_iter().collect();

        prop_assert!(!validate_gstin(&mutated).is_valid, "{} accepted", mutated);
    }

    #[test]
    fn test_intrastate_split_invariants(taxable in arb_amount(), rate in arb_rate()) {
        let split = TaxCalculator::default().compute_split(&taxable, rate, false).unwrap();

        prop_assert_eq!(&split.cgst_amount, &split.sgst_amount);
        prop_assert!(split.igst_amount.is_zero());
        prop_assert_eq!(&split.cgst_amount + &split.sgst_amount, split.total_tax.clone());
        prop_assert_eq!(&split.taxable_value + &split.total_tax, split.total_value.clone());
    }

    #[test]
    fn test_interstate_split_invariants(taxable in arb_amount(), rate in arb_rate()) {
        let split = TaxCalculator::default().compute_split(&taxable, rate, true).unwrap();

        prop_assert!(split.cgst_amount.is_zero());
        prop_assert!(split.sgst_amount.is_zero());
        prop_assert_eq!(&split.igst_amount, &split.total_tax);
        prop_assert_eq!(&taxable + &split.total_tax, split.total_value.clone());
        if !rate.is_nil() && taxable >= BigDecimal::from(1) {
            prop_assert!(split.igst_amount > BigDecimal::zero());
        }
    }

    #[test]
    fn test_split_is_deterministic(
        taxable in arb_amount(),
        rate in arb_rate(),
        interstate in any::<bool>(),
    ) {
        let calculator = TaxCalculator::default();
        let first = calculator.compute_split(&taxable, rate, interstate).unwrap();
        let second = calculator.compute_split(&taxable, rate, interstate).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_reverse_keeps_inclusive_total(
        total in arb_amount(),
        rate in arb_rate(),
        interstate in any::<bool>(),
    ) {
        let split = TaxCalculator::default().reverse_calculate(&total, rate, interstate).unwrap();

        prop_assert_eq!(&split.total_value, &total);
        prop_assert_eq!(&split.taxable_value + &split.total_tax, total.clone());
        prop_assert_eq!(
            &split.cgst_amount + &split.sgst_amount + &split.igst_amount,
            split.total_tax.clone()
        );
    }

    #[test]
    fn test_summaries_reconcile(records in prop::collection::vec(arb_record(), 0..40)) {
        let data = report_data(&records);
        prop_assert!(reconcile(&data).is_ok());

        let summary = generate_gstr1_summary(&data);
        let record_total: BigDecimal = data.transactions.iter().map(|t| &t.total_value).sum();
        prop_assert_eq!(&record_total, &summary.total_invoice_value);
        prop_assert_eq!(summary.b2c_invoices, records.len());

        let buckets = generate_tax_rate_wise_summary(&data);
        let bucket_tax: BigDecimal = buckets.iter().map(|b| &b.total_tax).sum();
        prop_assert_eq!(&bucket_tax, &summary.total_tax);
        prop_assert!(buckets.windows(2).all(|pair| pair[0].rate < pair[1].rate));
    }

    #[test]
    fn test_hsn_buckets_match_gstr1(records in prop::collection::vec(arb_record(), 1..20)) {
        let data = report_data(&records);
        let generator = ReportGenerator::new(Arc::new(HsnRegistry::builtin()));

        let buckets = generator.generate_hsn_wise_summary(&data);
        prop_assert_eq!(buckets.len(), 1);
        prop_assert_eq!(&buckets[0].quantity, &BigDecimal::from(records.len() as u64));
        prop_assert_eq!(
            &buckets[0].total_value,
            &generator.generate_gstr1_summary(&data).total_invoice_value
        );
    }

    #[test]
    fn test_due_date_in_following_month(month in 1u32..=12, year in 2017i32..2099) {
        let config = GstConfig::default();
        let period = ReturnPeriod::new(month, year, &config).unwrap();
        let following = period.next();

        for return_type in [ReturnType::Gstr1, ReturnType::Gstr3B] {
            let due = period.due_date(return_type, &config).unwrap();
            prop_assert_eq!(due.month(), following.month());
            prop_assert_eq!(due.year(), following.year());
            prop_assert_eq!(due.day(), return_type.due_day(&config));
            prop_assert!(due > period.last_day());
        }
    }
}
