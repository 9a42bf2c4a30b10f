//! # Ledger Error Types
//!
//! Error types for ledger and persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  StoreError (backend get/set failed)                                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  LedgerError (this module) ← adds ledger-integrity variants         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  PaymentSession surfaces a typed result; the UI renders a message   │
//! │                                                                     │
//! │  Special case: CorruptStore on load DEGRADES to an empty ledger     │
//! │  with a warning - it never aborts the caller.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Persistence backend failures.
///
/// The store is a localStorage-style key/value surface; the only things
/// that can go wrong are I/O-level.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing document failed.
    #[error("store I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Creates an Io error for a given key.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }
}

// =============================================================================
// Ledger Error
// =============================================================================

/// Ledger integrity and persistence errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A transaction with this id is already in the ledger.
    ///
    /// ## When This Occurs
    /// - The id generator produced a colliding suffix (astronomically rare)
    /// - A caller replays the same transaction
    ///
    /// The session retries with a fresh suffix before surfacing this.
    #[error("duplicate transaction id: {id}")]
    DuplicateId { id: String },

    /// Bounded id-regeneration retries were exhausted.
    ///
    /// ## When This Occurs
    /// Only if the generator keeps colliding - in practice this indicates
    /// a generator defect, so it is surfaced as a hard failure.
    #[error("could not generate a unique transaction id after {attempts} attempts")]
    IdGenerationExhausted { attempts: u32 },

    /// The persisted ledger document could not be parsed.
    ///
    /// Loaders catch this, log a warning, and continue with an empty
    /// ledger; it is never allowed to crash the host.
    #[error("persisted ledger is corrupt: {reason}")]
    CorruptStore { reason: String },

    /// Serializing transactions for export failed.
    #[error("export failed: {reason}")]
    Export { reason: String },

    /// Pricing or validation failed while building a transaction.
    #[error(transparent)]
    Core(#[from] paypro_core::CoreError),

    /// The persistence backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Creates a DuplicateId error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        LedgerError::DuplicateId { id: id.into() }
    }

    /// Creates a CorruptStore error from any parse failure.
    pub fn corrupt(reason: impl ToString) -> Self {
        LedgerError::CorruptStore {
            reason: reason.to_string(),
        }
    }

    /// Creates an Export error from any serialization failure.
    pub fn export(reason: impl ToString) -> Self {
        LedgerError::Export {
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::duplicate("TRX12345678ABCD");
        assert_eq!(err.to_string(), "duplicate transaction id: TRX12345678ABCD");

        let err = LedgerError::IdGenerationExhausted { attempts: 5 };
        assert_eq!(
            err.to_string(),
            "could not generate a unique transaction id after 5 attempts"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let core = paypro_core::CoreError::UnknownProduct("gold".to_string());
        let err: LedgerError = core.into();
        assert!(matches!(err, LedgerError::Core(_)));
    }
}
