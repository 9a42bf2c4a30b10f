//! End-to-end checkout flow: form validation through persistence, reload,
//! statistics, exports, and clearing - against a real file-backed store.

use paypro_core::validation::{validate_payment_form, PaymentForm};
use paypro_core::{Money, ProductCatalog};

use paypro_ledger::{
    to_csv, to_receipt_document, FileStore, LedgerStats, PaymentSession, TransactionFilter,
};

fn form(product_id: &str, quantity: i64, promo: Option<&str>) -> PaymentForm {
    PaymentForm {
        customer_name: "Budi Santoso".to_string(),
        customer_email: "budi@example.com".to_string(),
        product_id: product_id.to_string(),
        quantity,
        custom_price: None,
        payment_method: "transfer".to_string(),
        promo_code: promo.map(str::to_string),
    }
}

#[test]
fn checkout_persists_and_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ProductCatalog::default();

    let tx_id = {
        let store = FileStore::new(dir.path()).unwrap();
        let mut session = PaymentSession::load(store).unwrap();

        // custom-priced item at Rp 100.000 with a 10% code
        let mut submitted = form("custom", 1, Some("diskon10"));
        submitted.custom_price = Some(100_000);
        let request = validate_payment_form(&submitted, &catalog).unwrap();

        let tx = session.process_payment(&request).unwrap();
        assert_eq!(tx.subtotal, Money::new(100_000));
        assert_eq!(tx.discount, Money::new(10_000));
        assert_eq!(tx.tax, Money::new(9_900));
        assert_eq!(tx.total, Money::new(99_900));
        assert_eq!(tx.promo_code, "DISKON10");
        assert!(tx.is_balanced());
        tx.id
    };

    // A fresh session over the same directory sees the persisted record.
    let store = FileStore::new(dir.path()).unwrap();
    let session = PaymentSession::load(store).unwrap();

    assert_eq!(session.transactions().len(), 1);
    let reloaded = &session.transactions()[0];
    assert_eq!(reloaded.id, tx_id);
    assert_eq!(reloaded.customer_name, "Budi Santoso");
    assert_eq!(reloaded.total, Money::new(99_900));
}

#[test]
fn history_filters_statistics_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();
    let mut session = PaymentSession::load(store).unwrap();
    let catalog = ProductCatalog::default();

    let first = validate_payment_form(&form("basic", 2, None), &catalog).unwrap();
    let mut ewallet = form("premium", 1, Some("HEMAT50K"));
    ewallet.payment_method = "ewallet".to_string();
    ewallet.customer_name = "Siti Rahma".to_string();
    let second = validate_payment_form(&ewallet, &catalog).unwrap();

    session.process_payment(&first).unwrap();
    session.process_payment(&second).unwrap();

    // basic ×2: 300.000 + 33.000 tax = 333.000
    // premium ×1 - 50.000: 450.000 + 49.500 tax = 499.500
    let stats = session.statistics();
    assert_eq!(
        stats,
        LedgerStats {
            count: 2,
            total_revenue: Money::new(832_500),
            average_transaction: Money::new(416_250),
        }
    );

    let by_name = TransactionFilter::all().search("siti");
    assert_eq!(session.find(&by_name).count(), 1);
    let by_method = TransactionFilter::all().method(paypro_core::PaymentMethod::Transfer);
    assert_eq!(session.find(&by_method).count(), 1);

    let csv = to_csv(session.transactions()).unwrap();
    assert_eq!(csv.lines().count(), 3);
    // newest first: the e-wallet purchase is the first data row
    assert!(csv.lines().nth(1).unwrap().contains("\"Siti Rahma\""));
    assert!(csv.contains("\"E-Wallet\""));

    let receipt = to_receipt_document(&session.transactions()[0]);
    assert!(receipt.contains("Siti Rahma"));
    assert!(receipt.contains("HEMAT50K"));
    assert!(receipt.contains("Rp 499.500"));
}

#[test]
fn clearing_history_empties_the_persisted_document() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ProductCatalog::default();

    {
        let store = FileStore::new(dir.path()).unwrap();
        let mut session = PaymentSession::load(store).unwrap();
        let request = validate_payment_form(&form("standard", 1, None), &catalog).unwrap();
        session.process_payment(&request).unwrap();
        session.clear_history().unwrap();
        assert!(session.transactions().is_empty());
    }

    let store = FileStore::new(dir.path()).unwrap();
    let session = PaymentSession::load(store).unwrap();
    assert!(session.transactions().is_empty());
    assert_eq!(session.statistics(), LedgerStats::empty());
}
