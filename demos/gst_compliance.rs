//! GST compliance walkthrough: classify, validate, tax, and report a month of sales

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use gst_core::{
    get_return_due_date, validate_gstin, GstRate, GstReportData, HsnRegistry, InvoiceHeader,
    ReportGenerator, ReturnCalendar, ReturnType, TaxCalculator, TaxLine, TransactionRecord,
};

const SELLER: &str = "27AABCU9603R1ZN";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 GST Core - Compliance Walkthrough\n");

    // 1. Product classification
    println!("📦 HSN Suggestions:");
    let registry = Arc::new(HsnRegistry::builtin());
    for product in ["Amul toned milk 1L", "Basmati rice 5kg", "Colgate toothpaste", "Office chair"] {
        match registry.suggest(product).first() {
            Some(entry) => println!(
                "  {:<22} → {} {} ({})",
                product, entry.code, entry.description, entry.gst_rate
            ),
            None => println!("  {:<22} → no match", product),
        }
    }
    println!();

    // 2. GSTIN validation
    println!("🔎 GSTIN Validation:");
    for gstin in [SELLER, "07AABCU9603R1ZP", "27AABCU9603R1ZM", "99AABCU9603R1ZN"] {
        let result = validate_gstin(gstin);
        match result.error {
            None => println!("  ✓ {}", gstin),
            Some(error) => println!("  ❌ {}: {}", gstin, error),
        }
    }
    println!();

    // 3. Intra-state vs inter-state
    let calculator = TaxCalculator::default();
    let base_amount = BigDecimal::from(10000);

    println!("🏢 Intra-state Sale (Mumbai → Pune):");
    let intra = calculator.compute_for_parties(
        &base_amount,
        GstRate::Eighteen,
        SELLER,
        Some("27AAGCB7383J1Z4"),
        None,
    )?;
    println!("  Taxable:     ₹{}", intra.taxable_value);
    println!("  CGST ({}%):  ₹{}", intra.cgst_rate, intra.cgst_amount);
    println!("  SGST ({}%):  ₹{}", intra.sgst_rate, intra.sgst_amount);
    println!("  Total:       ₹{}", intra.total_value);
    println!();

    println!("🌍 Inter-state Sale (Mumbai → Delhi):");
    let inter = calculator.compute_for_parties(
        &base_amount,
        GstRate::Eighteen,
        SELLER,
        Some("07AABCU9603R1ZP"),
        None,
    )?;
    println!("  Taxable:     ₹{}", inter.taxable_value);
    println!("  IGST ({}%): ₹{}", inter.igst_rate, inter.igst_amount);
    println!("  Total:       ₹{}", inter.total_value);
    println!();

    // 4. Tax-inclusive MRP
    println!("🔄 Reverse Calculation (MRP ₹118 incl. 18%):");
    let reverse = calculator.reverse_calculate(&BigDecimal::from(118), GstRate::Eighteen, false)?;
    println!("  Taxable:     ₹{}", reverse.taxable_value);
    println!("  GST:         ₹{}", reverse.total_tax);
    println!();

    // 5. Counter invoice
    println!("🛒 Counter Invoice:");
    let lines = vec![
        TaxLine::from_unit_price(BigDecimal::from(2), BigDecimal::from(30), GstRate::Zero, "0401"),
        TaxLine::from_unit_price(BigDecimal::from(1), BigDecimal::from(450), GstRate::Five, "1006"),
        TaxLine::from_unit_price(BigDecimal::from(3), BigDecimal::from(40), GstRate::Eighteen, "3401"),
    ];
    let invoice = calculator.calculate_invoice(&lines, false)?;
    for (i, item) in invoice.line_items.iter().enumerate() {
        println!(
            "    {}. HSN {} {} @ {} = ₹{} (GST: ₹{})",
            i + 1,
            item.line.hsn_code,
            registry.lookup_by_code(&item.line.hsn_code)?.description,
            item.line.gst_rate,
            item.split.taxable_value,
            item.split.total_tax
        );
    }
    println!("    Grand Total: ₹{}", invoice.grand_total);
    println!();

    // 6. Month-end report
    println!("📊 GSTR-1 for July 2025:");
    let header = |number: &str, buyer: Option<&str>| InvoiceHeader {
        invoice_number: number.to_string(),
        invoice_date: NaiveDate::from_ymd_opt(2025, 7, 18).unwrap_or_default(),
        customer_gstin: buyer.map(str::to_string),
        customer_name: "Customer".to_string(),
    };
    let mut transactions: Vec<TransactionRecord> = invoice
        .line_items
        .iter()
        .map(|item| {
            TransactionRecord::from_split(
                header("KS-0101", None),
                item.line.hsn_code.clone(),
                item.line.quantity.clone(),
                item.line.gst_rate,
                item.split.clone(),
            )
        })
        .collect();
    transactions.push(TransactionRecord::from_split(
        header("KS-0102", Some("07AABCU9603R1ZP")),
        "8517",
        Some(BigDecimal::from(1)),
        GstRate::Eighteen,
        inter,
    ));

    let data = GstReportData {
        period: "072025".to_string(),
        gstin: SELLER.to_string(),
        legal_name: "Kumar Stores".to_string(),
        transactions,
    };

    let generator = ReportGenerator::new(Arc::clone(&registry));
    generator.reconcile(&data)?;
    let report = generator.generate_report(&data)?;

    println!("  B2B / B2C:   {} / {}", report.gstr1.b2b_invoices, report.gstr1.b2c_invoices);
    println!("  Taxable:     ₹{}", report.gstr1.total_taxable_value);
    println!("  Total tax:   ₹{}", report.gstr1.total_tax);
    println!("  Invoiced:    ₹{}", report.gstr1.total_invoice_value);
    println!("  By rate:");
    for bucket in &report.rate_wise {
        println!("    {:>4}  ₹{} tax on ₹{}", bucket.rate, bucket.total_tax, bucket.taxable_value);
    }
    println!("  By HSN:");
    for bucket in &report.hsn_wise {
        println!(
            "    {}  {:<20} qty {}  ₹{}",
            bucket.hsn_code, bucket.description, bucket.quantity, bucket.total_value
        );
    }
    println!();

    // 7. Filing calendar
    println!("📅 Filing Deadlines:");
    let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap_or_default();
    let calendar = ReturnCalendar::default();
    for return_type in [ReturnType::Gstr1, ReturnType::Gstr3B] {
        if let Some(due) = get_return_due_date("072025", return_type) {
            let status = if calendar.is_overdue_on("072025", return_type, today) {
                "overdue"
            } else {
                "open"
            };
            println!("  {:<7} due {} ({} as of {})", return_type, due, status, today);
        }
    }

    println!("\n🎉 GST compliance walkthrough completed successfully!");
    Ok(())
}
