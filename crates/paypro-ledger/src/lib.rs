//! # PayPro Ledger
//!
//! Transaction lifecycle and persistence for the PayPro engine: building
//! finalized records from validated checkouts, keeping the history, and
//! exporting it.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         paypro-ledger                               │
//! │                                                                     │
//! │  CheckoutRequest (paypro-core, already validated)                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  factory ──── recompute amounts, stamp id/time ──► Transaction      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  session ──── owns the ledger + store, persists every mutation      │
//! │       │              │                                              │
//! │       │              ├── ledger   (ordering, filters, statistics)   │
//! │       │              └── store    (localStorage-style key/value)    │
//! │       ▼                                                             │
//! │  export ──── CSV history + HTML receipt                             │
//! │                                                                     │
//! │  All arithmetic lives in paypro-core; this crate adds identity,     │
//! │  time, randomness, and I/O - the impure edges.                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod export;
pub mod factory;
pub mod ledger;
pub mod session;
pub mod store;

pub use error::{LedgerError, LedgerResult, StoreError, StoreResult};
pub use export::{csv_filename, receipt_filename, to_csv, to_receipt_document};
pub use factory::{generate_transaction_id, TransactionFactory};
pub use ledger::{Ledger, LedgerStats, TransactionFilter};
pub use session::{PaymentSession, SessionConfig, MAX_ID_ATTEMPTS};
pub use store::{FileStore, LedgerStore, MemoryStore, STORAGE_KEY};
