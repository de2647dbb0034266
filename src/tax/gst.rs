//! GST calculation engine for Indian tax compliance

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GstConfig;
use crate::gstin::resolve_supply_type;
use crate::types::{GstResult, GstRate, TaxLine, TaxSplit};
use crate::utils::{percent_of, round_money, validate_non_negative_amount, zero};

/// Split a taxable value into CGST + SGST or IGST using the default configuration
pub fn compute_split(
    taxable_value: &BigDecimal,
    gst_rate: GstRate,
    is_interstate: bool,
) -> GstResult<TaxSplit> {
    TaxCalculator::default().compute_split(taxable_value, gst_rate, is_interstate)
}

/// GST calculation engine
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    config: GstConfig,
}

impl TaxCalculator {
    /// Create a new tax calculator
    pub fn new(config: GstConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GstConfig {
        &self.config
    }

    /// Split a taxable value into its tax components
    ///
    /// Intrastate supplies carry CGST and SGST at half the rate each, interstate
    /// supplies carry IGST at the full rate. Each amount is rounded half-up on
    /// its own, so the total tax is the sum of the rounded components.
    pub fn compute_split(
        &self,
        taxable_value: &BigDecimal,
        gst_rate: GstRate,
        is_interstate: bool,
    ) -> GstResult<TaxSplit> {
        validate_non_negative_amount(taxable_value)?;
        let scale = self.config.money_scale;

        let (cgst_rate, sgst_rate, igst_rate) = if gst_rate.is_nil() {
            (zero(), zero(), zero())
        } else if is_interstate {
            (zero(), zero(), gst_rate.as_decimal())
        } else {
            (gst_rate.half_rate(), gst_rate.half_rate(), zero())
        };

        let cgst_amount = percent_of(taxable_value, &cgst_rate, scale);
        let sgst_amount = percent_of(taxable_value, &sgst_rate, scale);
        let igst_amount = percent_of(taxable_value, &igst_rate, scale);

        let total_tax = &cgst_amount + &sgst_amount + &igst_amount;
        let total_value = taxable_value + &total_tax;

        Ok(TaxSplit {
            taxable_value: taxable_value.clone(),
            cgst_rate,
            cgst_amount,
            sgst_rate,
            sgst_amount,
            igst_rate,
            igst_amount,
            total_tax,
            total_value,
        })
    }

    /// Split for one order line
    pub fn compute_line(&self, line: &TaxLine, is_interstate: bool) -> GstResult<TaxSplit> {
        self.compute_split(&line.taxable_value, line.gst_rate, is_interstate)
    }

    /// Split with the supply type worked out from the parties
    ///
    /// See [`resolve_supply_type`] for how a missing buyer GSTIN is handled;
    /// the configured [`BuyerStatePolicy`](crate::config::BuyerStatePolicy) applies.
    pub fn compute_for_parties(
        &self,
        taxable_value: &BigDecimal,
        gst_rate: GstRate,
        seller_gstin: &str,
        buyer_gstin: Option<&str>,
        buyer_state: Option<&str>,
    ) -> GstResult<TaxSplit> {
        let is_interstate = resolve_supply_type(
            seller_gstin,
            buyer_gstin,
            buyer_state,
            self.config.buyer_state_policy,
        )?;
        self.compute_split(taxable_value, gst_rate, is_interstate)
    }

    /// Back out the taxable value from a tax-inclusive price
    ///
    /// The taxable value absorbs any rounding difference, so `total_value`
    /// always equals `inclusive_total`.
    pub fn reverse_calculate(
        &self,
        inclusive_total: &BigDecimal,
        gst_rate: GstRate,
        is_interstate: bool,
    ) -> GstResult<TaxSplit> {
        validate_non_negative_amount(inclusive_total)?;
        let scale = self.config.money_scale;

        let divisor = BigDecimal::from(100) + gst_rate.as_decimal();
        let base = round_money(
            &((inclusive_total * BigDecimal::from(100)) / divisor),
            scale,
        );

        let mut split = self.compute_split(&base, gst_rate, is_interstate)?;
        split.taxable_value = inclusive_total - &split.total_tax;
        split.total_value = inclusive_total.clone();
        Ok(split)
    }

    /// Compute every line of an invoice and total them
    pub fn calculate_invoice(
        &self,
        lines: &[TaxLine],
        is_interstate: bool,
    ) -> GstResult<TaxInvoice> {
        let line_items = lines
            .iter()
            .map(|line| {
                Ok(InvoiceLine {
                    line: line.clone(),
                    split: self.compute_line(line, is_interstate)?,
                })
            })
            .collect::<GstResult<Vec<_>>>()?;

        let invoice = TaxInvoice::new(line_items);
        debug!(
            lines = invoice.line_items.len(),
            grand_total = %invoice.grand_total,
            is_interstate,
            "calculated invoice"
        );
        Ok(invoice)
    }
}

/// Invoice line with its computed split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub line: TaxLine,
    pub split: TaxSplit,
}

/// Complete GST invoice calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInvoice {
    /// Invoice line items
    pub line_items: Vec<InvoiceLine>,
    /// Total before GST
    pub total_taxable_value: BigDecimal,
    pub total_cgst: BigDecimal,
    pub total_sgst: BigDecimal,
    pub total_igst: BigDecimal,
    /// Total GST amount
    pub total_tax: BigDecimal,
    /// Grand total including GST
    pub grand_total: BigDecimal,
}

impl TaxInvoice {
    /// Create a new invoice from computed lines
    pub fn new(line_items: Vec<InvoiceLine>) -> Self {
        let total_taxable_value: BigDecimal = line_items
            .iter()
            .map(|item| &item.split.taxable_value)
            .sum();

        let total_cgst: BigDecimal = line_items.iter().map(|item| &item.split.cgst_amount).sum();
        let total_sgst: BigDecimal = line_items.iter().map(|item| &item.split.sgst_amount).sum();
        let total_igst: BigDecimal = line_items.iter().map(|item| &item.split.igst_amount).sum();

        let total_tax = &total_cgst + &total_sgst + &total_igst;
        let grand_total = &total_taxable_value + &total_tax;

        Self {
            line_items,
            total_taxable_value,
            total_cgst,
            total_sgst,
            total_igst,
            total_tax,
            grand_total,
        }
    }

    /// Add a line item to the invoice
    pub fn add_line_item(&mut self, line_item: InvoiceLine) {
        let mut line_items = std::mem::take(&mut self.line_items);
        line_items.push(line_item);
        *self = Self::new(line_items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuyerStatePolicy;
    use crate::types::GstError;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_intrastate_split() {
        let split = compute_split(&BigDecimal::from(1000), GstRate::Eighteen, false).unwrap();

        assert_eq!(split.cgst_rate, BigDecimal::from(9));
        assert_eq!(split.cgst_amount, BigDecimal::from(90));
        assert_eq!(split.sgst_rate, BigDecimal::from(9));
        assert_eq!(split.sgst_amount, BigDecimal::from(90));
        assert_eq!(split.igst_rate, BigDecimal::from(0));
        assert_eq!(split.igst_amount, BigDecimal::from(0));
        assert_eq!(split.total_tax, BigDecimal::from(180));
        assert_eq!(split.total_value, BigDecimal::from(1180));
    }

    #[test]
    fn test_interstate_split() {
        let split = compute_split(&BigDecimal::from(1000), GstRate::Eighteen, true).unwrap();

        assert_eq!(split.igst_rate, BigDecimal::from(18));
        assert_eq!(split.igst_amount, BigDecimal::from(180));
        assert_eq!(split.cgst_amount, BigDecimal::from(0));
        assert_eq!(split.sgst_amount, BigDecimal::from(0));
        assert_eq!(split.total_tax, BigDecimal::from(180));
        assert_eq!(split.total_value, BigDecimal::from(1180));
    }

    #[test]
    fn test_components_rounded_independently() {
        // 2.5% of 99.99 = 2.49975 -> 2.50 per head
        let split = compute_split(&dec("99.99"), GstRate::Five, false).unwrap();
        assert_eq!(split.cgst_rate, dec("2.5"));
        assert_eq!(split.cgst_amount, dec("2.50"));
        assert_eq!(split.sgst_amount, dec("2.50"));
        assert_eq!(split.total_tax, dec("5.00"));
        assert_eq!(split.total_value, dec("104.99"));

        // whereas 5% of 99.99 = 4.9995 -> 5.00 as a single IGST head
        let split = compute_split(&dec("99.99"), GstRate::Five, true).unwrap();
        assert_eq!(split.igst_amount, dec("5.00"));
    }

    #[test]
    fn test_zero_rate() {
        for is_interstate in [false, true] {
            let split = compute_split(&dec("250.75"), GstRate::Zero, is_interstate).unwrap();
            assert_eq!(split.total_tax, BigDecimal::from(0));
            assert_eq!(split.igst_rate, BigDecimal::from(0));
            assert_eq!(split.total_value, dec("250.75"));
        }
    }

    #[test]
    fn test_zero_taxable_value() {
        let split = compute_split(&BigDecimal::from(0), GstRate::TwentyEight, true).unwrap();
        assert_eq!(split.igst_amount, BigDecimal::from(0));
        assert_eq!(split.total_value, BigDecimal::from(0));
    }

    #[test]
    fn test_negative_taxable_value_rejected() {
        let err = compute_split(&dec("-100"), GstRate::Twelve, false).unwrap_err();
        assert!(matches!(err, GstError::NegativeTaxableValue(_)));
    }

    #[test]
    fn test_configured_scale() {
        let calculator = TaxCalculator::new(GstConfig {
            money_scale: 0,
            ..GstConfig::default()
        });
        // 9% of 105 = 9.45 -> 9
        let split = calculator
            .compute_split(&BigDecimal::from(105), GstRate::Eighteen, false)
            .unwrap();
        assert_eq!(split.cgst_amount, BigDecimal::from(9));
        assert_eq!(split.total_tax, BigDecimal::from(18));
    }

    #[test]
    fn test_reverse_calculation() {
        let calculator = TaxCalculator::default();
        let split = calculator
            .reverse_calculate(&BigDecimal::from(1180), GstRate::Eighteen, false)
            .unwrap();

        assert_eq!(split.total_value, BigDecimal::from(1180));
        assert_eq!(split.total_tax, BigDecimal::from(180));
        assert_eq!(split.taxable_value, BigDecimal::from(1000));
    }

    #[test]
    fn test_reverse_calculation_absorbs_rounding() {
        let calculator = TaxCalculator::default();
        let split = calculator
            .reverse_calculate(&BigDecimal::from(100), GstRate::Eighteen, false)
            .unwrap();

        // base 84.75, CGST = SGST = 7.63
        assert_eq!(split.cgst_amount, dec("7.63"));
        assert_eq!(split.total_tax, dec("15.26"));
        assert_eq!(split.taxable_value, dec("84.74"));
        assert_eq!(split.total_value, BigDecimal::from(100));
    }

    #[test]
    fn test_compute_for_parties() {
        let calculator = TaxCalculator::default();
        let split = calculator
            .compute_for_parties(
                &BigDecimal::from(500),
                GstRate::Twelve,
                "27AABCU9603R1ZN",
                Some("07AABCU9603R1ZP"),
                None,
            )
            .unwrap();
        assert_eq!(split.igst_amount, BigDecimal::from(60));

        let split = calculator
            .compute_for_parties(
                &BigDecimal::from(500),
                GstRate::Twelve,
                "27AABCU9603R1ZN",
                None,
                None,
            )
            .unwrap();
        assert_eq!(split.cgst_amount, BigDecimal::from(30));
        assert_eq!(split.sgst_amount, BigDecimal::from(30));
    }

    #[test]
    fn test_compute_for_parties_reject_policy() {
        let calculator = TaxCalculator::new(GstConfig {
            buyer_state_policy: BuyerStatePolicy::Reject,
            ..GstConfig::default()
        });
        let err = calculator
            .compute_for_parties(
                &BigDecimal::from(500),
                GstRate::Twelve,
                "27AABCU9603R1ZN",
                Some("not-a-gstin"),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, GstError::MissingBuyerState));
    }

    #[test]
    fn test_invoice() {
        let calculator = TaxCalculator::default();
        let lines = vec![
            TaxLine::from_unit_price(
                BigDecimal::from(2),
                BigDecimal::from(500),
                GstRate::Eighteen,
                "8516",
            ),
            TaxLine::new(BigDecimal::from(300), GstRate::Eighteen, "3401"),
            TaxLine::new(BigDecimal::from(60), GstRate::Zero, "0401"),
        ];

        let invoice = calculator.calculate_invoice(&lines, false).unwrap();

        assert_eq!(invoice.line_items.len(), 3);
        assert_eq!(invoice.total_taxable_value, BigDecimal::from(1360));
        assert_eq!(invoice.total_cgst, BigDecimal::from(117));
        assert_eq!(invoice.total_sgst, BigDecimal::from(117));
        assert_eq!(invoice.total_igst, BigDecimal::from(0));
        assert_eq!(invoice.total_tax, BigDecimal::from(234));
        assert_eq!(invoice.grand_total, BigDecimal::from(1594));
    }

    #[test]
    fn test_invoice_rejects_negative_line() {
        let calculator = TaxCalculator::default();
        let lines = vec![
            TaxLine::new(BigDecimal::from(300), GstRate::Eighteen, "3401"),
            TaxLine::new(BigDecimal::from(-5), GstRate::Eighteen, "3401"),
        ];
        assert!(calculator.calculate_invoice(&lines, false).is_err());
    }

    #[test]
    fn test_add_line_item_recalculates() {
        let calculator = TaxCalculator::default();
        let first = TaxLine::new(BigDecimal::from(100), GstRate::Five, "1006");
        let mut invoice = calculator.calculate_invoice(&[first], true).unwrap();

        let line = TaxLine::new(BigDecimal::from(200), GstRate::Twelve, "3004");
        let split = calculator.compute_line(&line, true).unwrap();
        invoice.add_line_item(InvoiceLine { line, split });

        assert_eq!(invoice.total_igst, BigDecimal::from(29));
        assert_eq!(invoice.grand_total, BigDecimal::from(329));
    }
}
