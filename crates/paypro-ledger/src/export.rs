//! # Export
//!
//! Renders transactions as CSV (history export) and as a standalone HTML
//! receipt document. Both outputs are plain strings; delivering them
//! (file download, HTTP response) is the host's job.
//!
//! ## CSV Escaping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Every field is quoted, and quotes inside a field are doubled:      │
//! │                                                                     │
//! │      Budi "The Boss" Santoso  →  "Budi ""The Boss"" Santoso"        │
//! │                                                                     │
//! │  The earlier string-concatenation exporter wrapped fields in        │
//! │  quotes without doubling embedded ones, which silently shifted      │
//! │  every following column. The csv writer makes that impossible.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money columns carry raw integer rupiah amounts (no `Rp`, no grouping)
//! so spreadsheets can sum them; the receipt uses the display formatting.

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use paypro_core::types::Transaction;

use crate::error::{LedgerError, LedgerResult};

/// CSV column headers, in the order the history table shows them.
const CSV_HEADERS: [&str; 11] = [
    "ID", "Tanggal", "Nama", "Email", "Produk", "Jumlah", "Metode", "Subtotal", "Diskon",
    "Pajak", "Total",
];

// =============================================================================
// CSV Export
// =============================================================================

/// Renders transactions as CSV, one row per transaction, header row first.
///
/// Accepts the ledger's newest-first order as-is. An empty slice yields
/// just the header row; refusing to export an empty ledger is a UI
/// decision, not an engine one.
pub fn to_csv(transactions: &[Transaction]) -> LedgerResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS).map_err(LedgerError::export)?;
    for tx in transactions {
        writer
            .write_record([
                tx.id.as_str(),
                tx.display_time.as_str(),
                tx.customer_name.as_str(),
                tx.customer_email.as_str(),
                tx.product.as_str(),
                &tx.quantity.to_string(),
                tx.payment_method.display_name(),
                &tx.subtotal.amount().to_string(),
                &tx.discount.amount().to_string(),
                &tx.tax.amount().to_string(),
                &tx.total.amount().to_string(),
            ])
            .map_err(LedgerError::export)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::export(e.into_error()))?;
    String::from_utf8(bytes).map_err(LedgerError::export)
}

/// Suggested filename for a history export: `riwayat-transaksi-<date>.csv`.
pub fn csv_filename(date: NaiveDate) -> String {
    format!("riwayat-transaksi-{}.csv", date.format("%Y-%m-%d"))
}

// =============================================================================
// Receipt Export
// =============================================================================

/// Suggested filename for a receipt: `struk-<id>.html`.
pub fn receipt_filename(tx: &Transaction) -> String {
    format!("struk-{}.html", tx.id)
}

/// Renders a transaction as a self-contained HTML receipt document.
///
/// Deterministic: the output depends only on the transaction's own fields,
/// so re-downloading a receipt later reproduces it byte for byte. The promo
/// and discount rows appear only when the transaction carries them.
pub fn to_receipt_document(tx: &Transaction) -> String {
    let mut rows = String::new();

    row_bold(&mut rows, "ID Transaksi:", &tx.id);
    row(&mut rows, "Tanggal:", &tx.display_time);
    row(&mut rows, "Nama:", &escape_html(&tx.customer_name));
    row(&mut rows, "Email:", &escape_html(&tx.customer_email));
    divider(&mut rows);
    row_bold(&mut rows, "DETAIL PEMBELIAN", "");
    row(&mut rows, "Produk:", &escape_html(&tx.product));
    row(&mut rows, "Jumlah:", &format!("{} item", tx.quantity));
    row(&mut rows, "Metode Bayar:", tx.payment_method.display_name());
    if tx.has_promo() {
        row(&mut rows, "Kode Promo:", &escape_html(&tx.promo_code));
    }
    divider(&mut rows);
    row(&mut rows, "Subtotal:", &tx.subtotal.to_string());
    if !tx.discount.is_zero() {
        rows.push_str(&format!(
            "        <div class=\"row discount\">\n            <span>Diskon:</span>\n            <span>-{}</span>\n        </div>\n",
            tx.discount
        ));
    }
    row(&mut rows, "Pajak (11%):", &tx.tax.to_string());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Struk Pembayaran - {id}</title>
    <style>
        body {{ font-family: 'Courier New', monospace; max-width: 400px; margin: 0 auto; padding: 20px; background: #f9f9f9; }}
        .receipt {{ background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        .header {{ text-align: center; border-bottom: 2px dashed #333; padding-bottom: 15px; margin-bottom: 20px; }}
        .header h1 {{ margin: 0; font-size: 18px; font-weight: bold; }}
        .header p {{ margin: 5px 0; font-size: 12px; color: #666; }}
        .row {{ display: flex; justify-content: space-between; margin: 8px 0; font-size: 14px; }}
        .row.bold {{ font-weight: bold; }}
        .row.discount {{ color: #4caf50; }}
        .divider {{ border-top: 1px dashed #666; margin: 15px 0; }}
        .total {{ border-top: 2px solid #333; padding-top: 15px; margin-top: 15px; font-weight: bold; font-size: 16px; }}
        .footer {{ text-align: center; margin-top: 25px; font-size: 11px; color: #666; border-top: 1px dashed #ccc; padding-top: 15px; }}
        .status {{ text-align: center; margin: 15px 0; padding: 8px; background: #e8f5e8; border: 1px solid #4caf50; border-radius: 4px; color: #2e7d32; font-weight: bold; }}
    </style>
</head>
<body>
    <div class="receipt">
        <div class="header">
            <h1>PaymentPro</h1>
            <p>Sistem Pembayaran Professional</p>
            <p>www.paymentpro.id | support@paymentpro.id</p>
        </div>

        <div class="status">&#10003; PEMBAYARAN BERHASIL</div>

{rows}
        <div class="total">
            <div class="row bold">
                <span>TOTAL BAYAR:</span>
                <span>{total}</span>
            </div>
        </div>

        <div class="footer">
            <p><strong>Terima kasih atas pembayaran Anda!</strong></p>
            <p>Struk ini adalah bukti pembayaran yang sah</p>
            <p>Simpan struk ini sebagai bukti transaksi</p>
        </div>
    </div>
</body>
</html>
"#,
        id = tx.id,
        rows = rows,
        total = tx.total,
    )
}

fn row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "        <div class=\"row\">\n            <span>{label}</span>\n            <span>{value}</span>\n        </div>\n"
    ));
}

fn row_bold(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "        <div class=\"row bold\">\n            <span>{label}</span>\n            <span>{value}</span>\n        </div>\n"
    ));
}

fn divider(out: &mut String) {
    out.push_str("        <div class=\"divider\"></div>\n");
}

/// Escapes the free-text fields interpolated into the receipt markup.
/// Sanitization upstream strips active content; this covers plain markup
/// characters like `<` in a product name.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================
