//! # Transaction Ledger
//!
//! Append-only, session-scoped collection of finalized transactions.
//!
//! ## Ledger Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Operations                              │
//! │                                                                     │
//! │  Checkout ───────► append(tx) ─────► head insert (newest first)     │
//! │                        │                                            │
//! │                        └── DuplicateId? → bounded suffix retry      │
//! │                                                                     │
//! │  History UI ─────► find(filter) ───► restartable iterator           │
//! │  Stats cards ────► statistics() ───► {count, revenue, average}      │
//! │  Clear button ───► clear() ────────► empty (irreversible)           │
//! │                                                                     │
//! │  Every mutating call is followed by a whole-document persist in     │
//! │  the session layer (Dirty → Persisted).                             │
//! │                                                                     │
//! │  Invariant: no two transactions share an id.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transactions themselves are terminal on creation - the ledger never
//! mutates a record, it only inserts, iterates, and clears.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use paypro_core::{Money, PaymentMethod, Transaction};

use crate::error::{LedgerError, LedgerResult};

// =============================================================================
// Transaction Filter
// =============================================================================

/// Combined search/filter predicate for [`Ledger::find`].
///
/// - `search`: case-insensitive substring match against customer name,
///   product name, and transaction id
/// - `method`: exact payment-method match
///
/// An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    search: Option<String>,
    method: Option<PaymentMethod>,
}

impl TransactionFilter {
    /// A filter that matches every transaction.
    pub fn all() -> Self {
        TransactionFilter::default()
    }

    /// Adds a case-insensitive text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_lowercase();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    /// Restricts matches to one payment method.
    pub fn method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Whether a transaction satisfies this filter.
    pub fn matches(&self, tx: &Transaction) -> bool {
        let matches_search = match &self.search {
            None => true,
            Some(term) => {
                tx.customer_name.to_lowercase().contains(term)
                    || tx.product.to_lowercase().contains(term)
                    || tx.id.to_lowercase().contains(term)
            }
        };

        let matches_method = match self.method {
            None => true,
            Some(method) => tx.payment_method == method,
        };

        matches_search && matches_method
    }
}

// =============================================================================
// Ledger Statistics
// =============================================================================

/// Aggregate statistics over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    /// Number of transactions.
    pub count: usize,

    /// Sum of all transaction totals.
    pub total_revenue: Money,

    /// `total_revenue / count` (integer division); zero when empty.
    pub average_transaction: Money,
}

impl LedgerStats {
    /// Statistics of an empty ledger.
    pub const fn empty() -> Self {
        LedgerStats {
            count: 0,
            total_revenue: Money::zero(),
            average_transaction: Money::zero(),
        }
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// The append-only transaction ledger, newest first.
///
/// This is the sole mutable aggregate in the engine. It is owned by exactly
/// one [`crate::session::PaymentSession`] at a time; there is no shared
/// mutable state and no locking because there is exactly one writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when the ledger holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterates all transactions in ledger order (newest first).
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// All transactions as a slice, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Looks up a transaction by id.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// True when a transaction with this id exists.
    pub fn contains_id(&self, id: &str) -> bool {
        self.transactions.iter().any(|tx| tx.id == id)
    }

    /// Inserts a transaction at the head (newest first).
    ///
    /// Fails with [`LedgerError::DuplicateId`] when the id already exists;
    /// the ledger is unchanged in that case.
    pub fn append(&mut self, tx: Transaction) -> LedgerResult<()> {
        if self.contains_id(&tx.id) {
            return Err(LedgerError::duplicate(&tx.id));
        }

        debug!(id = %tx.id, total = %tx.total, "appending transaction");
        self.transactions.insert(0, tx);
        Ok(())
    }

    /// Inserts a transaction, regenerating its id on collision.
    ///
    /// ## Retry Semantics
    /// On [`LedgerError::DuplicateId`] the id is replaced via `id_gen` and
    /// the insert retried, up to `max_attempts` regenerations; after that,
    /// [`LedgerError::IdGenerationExhausted`] - a collision that survives
    /// several fresh suffixes indicates a generator defect, not bad luck.
    ///
    /// Returns the id the transaction was finally inserted under.
    pub fn append_with_retry(
        &mut self,
        mut tx: Transaction,
        mut id_gen: impl FnMut() -> String,
        max_attempts: u32,
    ) -> LedgerResult<String> {
        let mut attempts = 0;
        while self.contains_id(&tx.id) {
            if attempts >= max_attempts {
                return Err(LedgerError::IdGenerationExhausted { attempts });
            }
            attempts += 1;
            warn!(duplicate = %tx.id, retry = attempts, "transaction id collision, regenerating");
            tx.id = id_gen();
        }

        let id = tx.id.clone();
        debug!(id = %id, total = %tx.total, "appending transaction");
        self.transactions.insert(0, tx);
        Ok(id)
    }

    /// Removes all transactions. Irreversible.
    ///
    /// User confirmation is the presentation layer's responsibility; the
    /// engine performs no confirmation itself.
    pub fn clear(&mut self) {
        debug!(count = self.transactions.len(), "clearing ledger");
        self.transactions.clear();
    }

    /// Finds transactions matching a filter.
    ///
    /// Returns a fresh iterator on every call (restartable), in ledger
    /// order. Does not mutate the ledger.
    pub fn find<'a>(
        &'a self,
        filter: &'a TransactionFilter,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |tx| filter.matches(tx))
    }

    /// Aggregate statistics: count, total revenue, average transaction.
    ///
    /// The average is `total / count` with integer division, and zero for
    /// an empty ledger (no division-by-zero fault).
    pub fn statistics(&self) -> LedgerStats {
        let count = self.transactions.len();
        if count == 0 {
            return LedgerStats::empty();
        }

        let total_revenue = self
            .transactions
            .iter()
            .fold(Money::zero(), |sum, tx| sum + tx.total);

        LedgerStats {
            count,
            total_revenue,
            average_transaction: Money::new(total_revenue.amount() / count as i64),
        }
    }

    /// Serializes the ledger to its persisted JSON document.
    pub fn serialize(&self) -> LedgerResult<String> {
        serde_json::to_string(&self.transactions).map_err(LedgerError::corrupt)
    }

    /// Parses a persisted ledger document.
    ///
    /// Fails with [`LedgerError::CorruptStore`] on malformed input; loaders
    /// are expected to catch that, warn, and continue with an empty ledger.
    pub fn deserialize(document: &str) -> LedgerResult<Ledger> {
        let transactions: Vec<Transaction> =
            serde_json::from_str(document).map_err(LedgerError::corrupt)?;
        Ok(Ledger { transactions })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use paypro_core::types::TransactionStatus;

    fn tx(id: &str, name: &str, method: PaymentMethod, total: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            customer_name: name.to_string(),
            customer_email: format!("{}@example.com", name.to_lowercase()),
            product: "Paket Basic".to_string(),
            product_id: "basic".to_string(),
            quantity: 1,
            payment_method: method,
            promo_code: String::new(),
            subtotal: Money::new(total),
            discount: Money::zero(),
            tax: Money::zero(),
            total: Money::new(total),
            created_at: Utc::now(),
            display_time: "23/08/2026, 10.00.00".to_string(),
            status: TransactionStatus::Success,
        }
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRX1", "Budi", PaymentMethod::Cash, 100)).unwrap();
        ledger.append(tx("TRX2", "Sari", PaymentMethod::Credit, 200)).unwrap();

        let ids: Vec<_> = ledger.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TRX2", "TRX1"]);
    }

    #[test]
    fn test_duplicate_id_rejected_and_ledger_unchanged() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRX1", "Budi", PaymentMethod::Cash, 100)).unwrap();

        let err = ledger
            .append(tx("TRX1", "Sari", PaymentMethod::Cash, 200))
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateId { ref id } if id == "TRX1"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("TRX1").unwrap().customer_name, "Budi");
    }

    #[test]
    fn test_retry_produces_distinct_ids() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRXSAME", "Budi", PaymentMethod::Cash, 100)).unwrap();

        // Forced collision: the second transaction arrives with the same id
        // and the generator supplies a fresh one on retry.
        let second = tx("TRXSAME", "Sari", PaymentMethod::Credit, 200);
        let id = ledger
            .append_with_retry(second, || "TRXFRESH".to_string(), 5)
            .unwrap();

        assert_eq!(id, "TRXFRESH");
        assert_eq!(ledger.len(), 2);
        let ids: Vec<_> = ledger.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TRXFRESH", "TRXSAME"]);
    }

    #[test]
    fn test_retry_exhausted_when_generator_keeps_colliding() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRXSAME", "Budi", PaymentMethod::Cash, 100)).unwrap();

        let second = tx("TRXSAME", "Sari", PaymentMethod::Credit, 200);
        let err = ledger
            .append_with_retry(second, || "TRXSAME".to_string(), 3)
            .unwrap_err();

        assert!(matches!(err, LedgerError::IdGenerationExhausted { attempts: 3 }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_find_empty_filter_is_idempotent() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRX1", "Budi", PaymentMethod::Cash, 100)).unwrap();
        ledger.append(tx("TRX2", "Sari", PaymentMethod::Credit, 200)).unwrap();

        let filter = TransactionFilter::all();
        for _ in 0..3 {
            let ids: Vec<_> = ledger.find(&filter).map(|t| t.id.as_str()).collect();
            assert_eq!(ids, ["TRX2", "TRX1"]);
        }
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_find_text_search_is_case_insensitive() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRX1", "Budi Santoso", PaymentMethod::Cash, 100)).unwrap();
        ledger.append(tx("TRX2", "Sari Dewi", PaymentMethod::Cash, 200)).unwrap();

        // name, id, and product are all searchable
        assert_eq!(ledger.find(&TransactionFilter::all().search("BUDI")).count(), 1);
        assert_eq!(ledger.find(&TransactionFilter::all().search("trx2")).count(), 1);
        assert_eq!(ledger.find(&TransactionFilter::all().search("paket")).count(), 2);
        assert_eq!(ledger.find(&TransactionFilter::all().search("nobody")).count(), 0);
    }

    #[test]
    fn test_find_combines_search_and_method() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRX1", "Budi", PaymentMethod::Cash, 100)).unwrap();
        ledger.append(tx("TRX2", "Budi", PaymentMethod::Credit, 200)).unwrap();

        let filter = TransactionFilter::all()
            .search("budi")
            .method(PaymentMethod::Credit);
        let ids: Vec<_> = ledger.find(&filter).map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TRX2"]);
    }

    #[test]
    fn test_statistics() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRX1", "Budi", PaymentMethod::Cash, 100_000)).unwrap();
        ledger.append(tx("TRX2", "Sari", PaymentMethod::Cash, 50_000)).unwrap();

        let stats = ledger.statistics();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_revenue, Money::new(150_000));
        assert_eq!(stats.average_transaction, Money::new(75_000));
    }

    #[test]
    fn test_clear_then_statistics_is_zero() {
        let mut ledger = Ledger::new();
        ledger.append(tx("TRX1", "Budi", PaymentMethod::Cash, 100_000)).unwrap();
        ledger.clear();

        assert!(ledger.is_empty());
        assert_eq!(ledger.statistics(), LedgerStats::empty());
    }

    #[test]
    fn test_serialize_round_trip() {
        for n in [0usize, 1, 5] {
            let mut ledger = Ledger::new();
            for i in 0..n {
                ledger
                    .append(tx(&format!("TRX{i}"), "Budi", PaymentMethod::Ewallet, 1_000))
                    .unwrap();
            }

            let doc = ledger.serialize().unwrap();
            let restored = Ledger::deserialize(&doc).unwrap();
            assert_eq!(restored, ledger, "round trip of {n} transactions");
        }
    }

    #[test]
    fn test_deserialize_malformed_is_corrupt_store() {
        for doc in ["not json", "{\"a\":1}", "[{\"id\":42}]"] {
            let err = Ledger::deserialize(doc).unwrap_err();
            assert!(matches!(err, LedgerError::CorruptStore { .. }), "{doc}");
        }
    }
}
