//! # Payment Session
//!
//! The single owner of a ledger and its backing store.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     PaymentSession Lifecycle                        │
//! │                                                                     │
//! │  Startup:   PaymentSession::load(store)                             │
//! │             ├── key missing  → empty ledger                         │
//! │             ├── key corrupt  → warn! + empty ledger (never aborts)  │
//! │             └── key valid    → Loaded (memory mirrors store)        │
//! │                                                                     │
//! │  Submit:    process_payment(request)                                │
//! │             ├── factory recomputes amounts, builds record           │
//! │             ├── ledger append (bounded id retry on collision)       │
//! │             └── persist whole document  (Dirty → Persisted)         │
//! │                                                                     │
//! │  Clear:     clear_history() → empty + persist                       │
//! │             (user confirmation is the UI's job, not the engine's)   │
//! │                                                                     │
//! │  Reads:     find / statistics / transactions - no persistence       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and runs to completion before returning; the
//! original UI's 1.5-second "processing" spinner was cosmetic and is a
//! presentation concern, not part of this contract.
//!
//! This replaces the browser implementation's `PaymentSystem` class, whose
//! promo table and transaction list were ambient object state touched
//! directly by event handlers - here the ledger is an explicit value owned
//! by the session.

use tracing::{debug, info, warn};

use paypro_core::types::{CartSelection, TaxRate, Transaction};
use paypro_core::validation::CheckoutRequest;
use paypro_core::{pricing, ProductCatalog, PromoRegistry, PromoRule};

use crate::error::{LedgerError, LedgerResult};
use crate::factory::{generate_transaction_id, TransactionFactory};
use crate::ledger::{Ledger, LedgerStats, TransactionFilter};
use crate::store::{LedgerStore, STORAGE_KEY};

/// Id regenerations allowed before [`LedgerError::IdGenerationExhausted`].
pub const MAX_ID_ATTEMPTS: u32 = 5;

// =============================================================================
// Session Configuration
// =============================================================================

/// Session configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = SessionConfig::default().storage_key("staging-ledger");
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Store key the ledger document lives under.
    /// Default: [`STORAGE_KEY`].
    pub storage_key: String,

    /// Tax rate applied at checkout.
    /// Default: the 11% domain rate.
    pub tax_rate: TaxRate,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            storage_key: STORAGE_KEY.to_string(),
            tax_rate: TaxRate::default(),
        }
    }
}

impl SessionConfig {
    /// Sets the storage key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the tax rate.
    pub fn tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate = rate;
        self
    }
}

// =============================================================================
// Payment Session
// =============================================================================

/// One logical payment session: an owned ledger, its store, and the
/// reference data needed to finalize checkouts.
#[derive(Debug)]
pub struct PaymentSession<S: LedgerStore> {
    config: SessionConfig,
    factory: TransactionFactory,
    ledger: Ledger,
    store: S,
}

impl<S: LedgerStore> PaymentSession<S> {
    /// Loads a session with default configuration and reference data.
    pub fn load(store: S) -> LedgerResult<Self> {
        let config = SessionConfig::default();
        let factory = TransactionFactory::new(
            ProductCatalog::default(),
            PromoRegistry::default(),
            config.tax_rate,
        );
        Self::load_with(store, config, factory)
    }

    /// Loads a session, reading the persisted ledger from the store.
    ///
    /// A missing key yields an empty ledger (not an error). A document that
    /// fails to parse yields an empty ledger and a warning - a corrupt
    /// store degrades, it never crashes the caller.
    pub fn load_with(
        store: S,
        config: SessionConfig,
        factory: TransactionFactory,
    ) -> LedgerResult<Self> {
        let ledger = match store.get(&config.storage_key)? {
            None => {
                debug!(key = %config.storage_key, "no persisted ledger, starting empty");
                Ledger::new()
            }
            Some(document) => match Ledger::deserialize(&document) {
                Ok(ledger) => {
                    info!(key = %config.storage_key, count = ledger.len(), "loaded ledger");
                    ledger
                }
                Err(LedgerError::CorruptStore { reason }) => {
                    warn!(key = %config.storage_key, %reason, "persisted ledger is corrupt, starting empty");
                    Ledger::new()
                }
                Err(other) => return Err(other),
            },
        };

        Ok(PaymentSession {
            config,
            factory,
            ledger,
            store,
        })
    }

    /// Processes a validated checkout: build, append, persist.
    ///
    /// The request must have passed form validation
    /// ([`paypro_core::validation::validate_payment_form`]); this method
    /// re-derives the arithmetic only. The returned transaction is the
    /// record as persisted, including its final id after any retries.
    pub fn process_payment(&mut self, request: &CheckoutRequest) -> LedgerResult<Transaction> {
        let tx = self.factory.create(request)?;
        let id = self
            .ledger
            .append_with_retry(tx, generate_transaction_id, MAX_ID_ATTEMPTS)?;
        self.persist()?;

        info!(%id, "payment processed");
        // append_with_retry inserted under this id one line above
        self.ledger
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::corrupt("inserted transaction missing from ledger"))
    }

    /// Resolves a promo code against the current cart.
    ///
    /// Returns the rule (for its description) when the code exists and the
    /// cart's subtotal reaches its floor. Call again whenever the subtotal
    /// changes - a code can go stale after a quantity edit.
    pub fn apply_promo(&self, code: &str, cart: &CartSelection) -> LedgerResult<&PromoRule> {
        let (_, unit_price) = self
            .factory
            .catalog()
            .resolve(&cart.product_id, cart.unit_price)?;
        let subtotal = pricing::compute_subtotal(unit_price, cart.quantity)?;
        Ok(self.factory.registry().resolve(code, subtotal)?)
    }

    /// Empties the ledger and persists the empty document. Irreversible.
    pub fn clear_history(&mut self) -> LedgerResult<()> {
        self.ledger.clear();
        self.persist()
    }

    /// Finds transactions matching a filter. Read-only, restartable.
    pub fn find<'a>(
        &'a self,
        filter: &'a TransactionFilter,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.ledger.find(filter)
    }

    /// Aggregate statistics over the whole ledger.
    pub fn statistics(&self) -> LedgerStats {
        self.ledger.statistics()
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// The owned ledger (read access for exporters).
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Serializes and writes the whole ledger document.
    fn persist(&mut self) -> LedgerResult<()> {
        let document = self.ledger.serialize()?;
        self.store.set(&self.config.storage_key, &document)?;
        debug!(key = %self.config.storage_key, count = self.ledger.len(), "ledger persisted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
