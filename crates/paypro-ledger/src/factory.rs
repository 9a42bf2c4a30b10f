//! # Transaction Factory
//!
//! Builds immutable [`Transaction`] records from validated checkout input.
//!
//! ## Creation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  TransactionFactory::create                         │
//! │                                                                     │
//! │  CheckoutRequest (already form-validated)                           │
//! │       │                                                             │
//! │       ├── 1. resolve product name + catalog price                   │
//! │       ├── 2. re-resolve promo rule + eligibility against subtotal   │
//! │       ├── 3. RECOMPUTE subtotal/discount/tax/total                  │
//! │       │      (never trust a caller-supplied total)                  │
//! │       ├── 4. generate id: TRX + ts8 + 4× base-36                    │
//! │       ├── 5. stamp created_at (Utc) + display_time (id-ID)          │
//! │       └── 6. sanitize free-text customer fields                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Transaction { status: Success }                                    │
//! │                                                                     │
//! │  Id collisions are handled at INSERT time by the ledger's bounded   │
//! │  retry; the factory only promises high-probability uniqueness.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use paypro_core::sanitize::sanitize_text;
use paypro_core::types::{TaxRate, Transaction, TransactionStatus};
use paypro_core::validation::CheckoutRequest;
use paypro_core::{pricing, ProductCatalog, PromoRegistry, PromoRule};

use crate::error::LedgerResult;

/// Id prefix for every transaction.
const ID_PREFIX: &str = "TRX";

/// Length of the random base-36 suffix.
const SUFFIX_LEN: usize = 4;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Id Generation
// =============================================================================

/// Generates a transaction id: `TRX` + the last 8 digits of the millisecond
/// timestamp + a 4-character uppercase base-36 suffix.
///
/// The time prefix makes ids roughly sortable and collision-resistant
/// across sessions; the random suffix covers multiple transactions in the
/// same millisecond. No central counter needed.
///
/// ## Example
/// `TRX47113532K9QX`
pub fn generate_transaction_id() -> String {
    generate_transaction_id_at(Utc::now())
}

/// Like [`generate_transaction_id`], with an explicit instant (tests).
pub fn generate_transaction_id_at(now: DateTime<Utc>) -> String {
    let ts8 = (now.timestamp_millis().rem_euclid(100_000_000)) as u64;
    format!("{}{:08}{}", ID_PREFIX, ts8, random_suffix())
}

/// Four base-36 characters drawn from UUID v4 randomness.
///
/// The workspace already carries uuid for identity; reusing its RNG avoids
/// a separate rand dependency.
fn random_suffix() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    suffix
}

/// Formats the human display timestamp: `dd/mm/yyyy, hh.mm.ss`.
///
/// Matches the id-ID rendering the original receipts showed. The canonical
/// sortable instant is stored separately on the record.
pub fn format_display_time(instant: DateTime<Utc>) -> String {
    instant.format("%d/%m/%Y, %H.%M.%S").to_string()
}

// =============================================================================
// Transaction Factory
// =============================================================================

/// Assembles finalized transactions from validated checkout requests.
///
/// Holds the immutable reference data (catalog, promo registry, tax rate);
/// all amounts are recomputed here regardless of what the caller displayed.
#[derive(Debug, Clone)]
pub struct TransactionFactory {
    catalog: ProductCatalog,
    registry: PromoRegistry,
    tax_rate: TaxRate,
}

impl TransactionFactory {
    /// Creates a factory with the given reference data.
    pub fn new(catalog: ProductCatalog, registry: PromoRegistry, tax_rate: TaxRate) -> Self {
        TransactionFactory {
            catalog,
            registry,
            tax_rate,
        }
    }

    /// The promo registry this factory resolves codes against.
    pub fn registry(&self) -> &PromoRegistry {
        &self.registry
    }

    /// The product catalog this factory resolves products against.
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Builds a transaction from a validated request.
    ///
    /// Recomputes every amount, re-checks promo eligibility against the
    /// recomputed subtotal (a code applied earlier can have gone stale after
    /// a quantity edit), sanitizes the free-text fields, and stamps id,
    /// timestamps, and `Success` status.
    pub fn create(&self, request: &CheckoutRequest) -> LedgerResult<Transaction> {
        let cart = &request.cart;

        let (product_name, unit_price) = self
            .catalog
            .resolve(&cart.product_id, cart.unit_price)?;

        let subtotal = pricing::compute_subtotal(unit_price, cart.quantity)?;

        let rule: Option<&PromoRule> = match cart.promo_code.as_deref() {
            Some(code) => Some(self.registry.resolve(code, subtotal)?),
            None => None,
        };

        // Price against the RESOLVED unit price - for catalog products the
        // caller-supplied figure is display data, not an input.
        let priced_cart = paypro_core::types::CartSelection {
            unit_price,
            ..cart.clone()
        };
        let breakdown = pricing::price_cart(&priced_cart, rule, self.tax_rate)?;

        let created_at = Utc::now();
        Ok(Transaction {
            id: generate_transaction_id_at(created_at),
            customer_name: sanitize_text(&request.customer_name),
            customer_email: sanitize_text(&request.customer_email),
            product: product_name,
            product_id: cart.product_id.clone(),
            quantity: cart.quantity,
            payment_method: request.payment_method,
            promo_code: rule.map(|r| r.code.clone()).unwrap_or_default(),
            subtotal: breakdown.subtotal,
            discount: breakdown.discount,
            tax: breakdown.tax,
            total: breakdown.total,
            created_at,
            display_time: format_display_time(created_at),
            status: TransactionStatus::Success,
        })
    }
}

impl Default for TransactionFactory {
    fn default() -> Self {
        TransactionFactory::new(
            ProductCatalog::default(),
            PromoRegistry::default(),
            TaxRate::default(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
