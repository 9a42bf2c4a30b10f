//! # Error Types
//!
//! Domain-specific error types for paypro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  paypro-core errors (this file)                                     │
//! │  ├── CoreError        - Pricing and promo rule failures             │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  paypro-ledger errors (separate crate)                              │
//! │  ├── LedgerError      - Ledger integrity / store corruption         │
//! │  └── StoreError       - Persistence backend failures                │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → LedgerError → UI message       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, code, floor amount)
//! 3. Errors are enum variants, never String
//! 4. Every failure path is recoverable by the caller; nothing panics

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing and promo-rule errors.
///
/// These errors represent arithmetic precondition violations or promo
/// eligibility failures. All of them are recoverable: the caller re-validates
/// input or surfaces a user-facing message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An arithmetic precondition was violated.
    ///
    /// ## When This Occurs
    /// - Negative unit price handed to the pricing calculator
    /// - Quantity outside the 1..=99 guard
    ///
    /// Always recoverable: the caller re-validates and retries.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A promo code exists but the cart does not meet its purchase floor.
    ///
    /// ## When This Occurs
    /// - `SAVE100K` applied to a subtotal below Rp 500.000
    /// - A previously-applied code after the quantity was edited downward
    ///
    /// Surfaced as a user-facing message, never fatal. Callers must re-check
    /// eligibility on every subtotal change.
    #[error("promo code {code} requires a minimum purchase of {minimum}")]
    BelowMinimumPurchase { code: String, minimum: Money },

    /// An unknown product id was used in a cart selection.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet the form rules. They are
/// produced by the pure validators in [`crate::validation`] and carry enough
/// context for the UI to render a per-field message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Value is below the allowed minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: i64 },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value is not in the allowed set (e.g., unknown payment method).
    #[error("{field} must be one of: {allowed}")]
    NotAllowed {
        field: &'static str,
        allowed: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
