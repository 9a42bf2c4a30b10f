//! # paypro-core: Pure Business Logic for the PayPro Engine
//!
//! This crate is the **heart** of the PayPro transaction pricing engine.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     PayPro Engine Architecture                      │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  Browser UI (external collaborator)           │ │
//! │  │    Payment form ──► Order summary ──► History ──► Exports     │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                      paypro-ledger                             │ │
//! │  │    PaymentSession, TransactionLedger, LedgerStore, Exporter    │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                ★ paypro-core (THIS CRATE) ★                    │ │
//! │  │                                                                │ │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │ │
//! │  │  │  money  │ │ pricing │ │  promo  │ │validation│ │sanitize │ │ │
//! │  │  │  Money  │ │ subtotal│ │ registry│ │  form    │ │  text   │ │ │
//! │  │  │ TaxRate │ │ tax/total│ │eligible│ │  rules   │ │ filter  │ │ │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │ │
//! │  │                                                                │ │
//! │  │   NO I/O • NO CLOCK • NO RNG • PURE FUNCTIONS                  │ │
//! │  └────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (Transaction, PaymentMethod, TaxRate, ...)
//! - [`catalog`] - Fixed product table + the `custom` price sentinel
//! - [`promo`] - Promo code registry and eligibility rules
//! - [`pricing`] - The subtotal/discount/tax/total pipeline
//! - [`validation`] - Pure form validation returning field-keyed errors
//! - [`sanitize`] - Defensive free-text filter
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; clocks and randomness
//!    live in `paypro-ledger`
//! 2. **Integer Money**: whole-rupiah i64 amounts, never floats
//! 3. **Explicit Errors**: typed enums, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use paypro_core::money::Money;
//! use paypro_core::pricing;
//! use paypro_core::promo::PromoRegistry;
//! use paypro_core::types::TaxRate;
//!
//! let registry = PromoRegistry::default();
//! let rule = registry.lookup("DISKON10");
//!
//! let subtotal = pricing::compute_subtotal(Money::new(100_000), 1).unwrap();
//! let discount = pricing::compute_discount(subtotal, rule);
//! let tax = pricing::compute_tax(subtotal - discount, TaxRate::default());
//!
//! assert_eq!(pricing::compute_total(subtotal, discount, tax), Money::new(99_900));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod promo;
pub mod sanitize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use paypro_core::Money` instead of
// `use paypro_core::money::Money`

pub use catalog::{Product, ProductCatalog, CUSTOM_PRODUCT_ID};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use promo::{PromoKind, PromoRegistry, PromoRule};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The engine's fixed domain tax rate, in basis points: 11% VAT.
///
/// Fixed for this domain, but every calculator entry point takes the rate
/// as a parameter so the arithmetic is reusable elsewhere.
pub const TAX_RATE_BPS: u32 = 1100;

/// Maximum quantity for a single purchase.
///
/// Prevents accidental over-ordering (e.g., typing 999 instead of 9).
pub const MAX_QUANTITY: i64 = 99;

/// Minimum unit price for custom-priced products, in whole rupiah.
pub const MIN_CUSTOM_PRICE: i64 = 1_000;

/// Minimum customer name length, in characters.
pub const MIN_NAME_LEN: usize = 2;
