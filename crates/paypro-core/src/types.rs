//! # Domain Types
//!
//! Core domain types used throughout the PayPro engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐  │
//! │  │  CartSelection  │   │   Transaction   │   │ PricingBreakdown │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │  │
//! │  │  product_id     │   │  id (TRX…)      │   │  subtotal        │  │
//! │  │  unit_price     │   │  customer_*     │   │  discount        │  │
//! │  │  quantity       │   │  amounts        │   │  tax             │  │
//! │  │  promo_code     │   │  created_at     │   │  total           │  │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────┘  │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌───────────────────┐                       │
//! │  │    TaxRate      │   │   PaymentMethod   │                       │
//! │  │  bps (u32)      │   │   Transfer        │                       │
//! │  │  1100 = 11%     │   │   Ewallet         │                       │
//! │  └─────────────────┘   │   Credit / Cash   │                       │
//! │                        └───────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization Compatibility
//! `Transaction` serializes with the same camelCase field names the browser
//! implementation stored under the `paymentTransactions` key, so a ledger
//! written by the old UI deserializes cleanly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1100 bps = 11% (Indonesian VAT, the engine default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    /// The engine's fixed domain rate: 11% VAT.
    fn default() -> Self {
        TaxRate(crate::TAX_RATE_BPS)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// The fixed enumerated set of payment methods.
///
/// Replaces the original string-keyed `paymentMethodNames` lookup table with
/// an explicit enum; the wire encoding stays the lowercase strings the form
/// submitted (`transfer`, `ewallet`, `credit`, `cash`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Bank transfer.
    Transfer,
    /// E-wallet payment (OVO, GoPay, DANA, ...).
    Ewallet,
    /// Credit card.
    Credit,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    /// All methods, in form display order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Transfer,
        PaymentMethod::Ewallet,
        PaymentMethod::Credit,
        PaymentMethod::Cash,
    ];

    /// The wire/form value for this method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Ewallet => "ewallet",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Cash => "cash",
        }
    }

    /// The human-readable name shown on receipts and exports.
    pub const fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Transfer => "Transfer Bank",
            PaymentMethod::Ewallet => "E-Wallet",
            PaymentMethod::Credit => "Kartu Kredit",
            PaymentMethod::Cash => "Bayar Tunai",
        }
    }

    /// Parses a form value into a method.
    pub fn parse(value: &str) -> Option<PaymentMethod> {
        match value {
            "transfer" => Some(PaymentMethod::Transfer),
            "ewallet" => Some(PaymentMethod::Ewallet),
            "credit" => Some(PaymentMethod::Credit),
            "cash" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

// =============================================================================
// Transaction Status
// =============================================================================

/// The status of a finalized transaction.
///
/// ## Known Limitation
/// Validation happens before a transaction is created, so no failed
/// transaction is ever recorded and `Success` is currently the only variant.
/// The enum exists so downstream consumers can grow an outcome taxonomy
/// without changing the record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Payment completed; the only reachable state today.
    Success,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Success
    }
}

// =============================================================================
// Cart Selection
// =============================================================================

/// Transient input to the pricing pipeline. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSelection {
    /// Catalog product id, or the `"custom"` sentinel.
    pub product_id: String,

    /// Unit price in whole rupiah. For catalog products this is the catalog
    /// price; for `custom` it is the user-entered price (floor Rp 1.000).
    pub unit_price: Money,

    /// Quantity, valid range 1..=99.
    pub quantity: i64,

    /// Promo code, uppercase-normalized. `None` when no code was applied.
    pub promo_code: Option<String>,
}

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// The four computed amounts for one cart.
///
/// Produced by [`crate::pricing::price_cart`]; consumed by the transaction
/// factory and by the UI's live order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingBreakdown {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Transaction
// =============================================================================

/// A finalized, immutable payment transaction.
///
/// ## Invariants
/// - `total == subtotal - discount + tax`
/// - `discount <= subtotal` (no negative totals)
/// - `tax == round_half_up(rate × (subtotal - discount))`
/// - Created once by the factory; never mutated; removed only by ledger clear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique id: `TRX` + 8 timestamp digits + 4 random base-36 chars.
    pub id: String,

    /// Customer name (sanitized free text).
    pub customer_name: String,

    /// Customer email (sanitized free text).
    pub customer_email: String,

    /// Product display name at time of purchase (frozen).
    pub product: String,

    /// Catalog product id, or `"custom"`.
    pub product_id: String,

    /// Quantity purchased (1..=99).
    pub quantity: i64,

    /// Payment method.
    pub payment_method: PaymentMethod,

    /// Applied promo code; empty string when none was applied.
    pub promo_code: String,

    /// Line subtotal before discount and tax.
    pub subtotal: Money,

    /// Discount amount (0 when no promo applied).
    pub discount: Money,

    /// Tax on the discounted amount.
    pub tax: Money,

    /// Amount charged: subtotal - discount + tax.
    pub total: Money,

    /// Canonical sortable instant.
    #[serde(rename = "timestamp")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Locale display timestamp (dd/mm/yyyy, hh.mm.ss), frozen at creation.
    #[serde(rename = "time")]
    pub display_time: String,

    /// Always `Success`; see [`TransactionStatus`].
    pub status: TransactionStatus,
}

impl Transaction {
    /// Checks the monetary invariant: `total == subtotal - discount + tax`
    /// and `discount <= subtotal`.
    pub fn is_balanced(&self) -> bool {
        self.discount <= self.subtotal
            && self.total == self.subtotal - self.discount + self.tax
            && !self.total.is_negative()
    }

    /// True when a promo code was applied to this transaction.
    #[inline]
    pub fn has_promo(&self) -> bool {
        !self.promo_code.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        Transaction {
            id: "TRX12345678ABCD".to_string(),
            customer_name: "Budi Santoso".to_string(),
            customer_email: "budi@example.com".to_string(),
            product: "Paket Premium".to_string(),
            product_id: "premium".to_string(),
            quantity: 2,
            payment_method: PaymentMethod::Ewallet,
            promo_code: "DISKON10".to_string(),
            subtotal: Money::new(100_000),
            discount: Money::new(10_000),
            tax: Money::new(9_900),
            total: Money::new(99_900),
            created_at: Utc::now(),
            display_time: "23/08/2026, 10.15.00".to_string(),
            status: TransactionStatus::Success,
        }
    }

    #[test]
    fn test_tax_rate_default_is_eleven_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.bps(), 1100);
        assert!((rate.percentage() - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_payment_method_round_trip() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("crypto"), None);
    }

    #[test]
    fn test_payment_method_display_names() {
        assert_eq!(PaymentMethod::Transfer.display_name(), "Transfer Bank");
        assert_eq!(PaymentMethod::Cash.display_name(), "Bayar Tunai");
    }

    #[test]
    fn test_transaction_is_balanced() {
        let tx = sample_transaction();
        assert!(tx.is_balanced());

        let mut broken = sample_transaction();
        broken.total = Money::new(1);
        assert!(!broken.is_balanced());

        let mut over_discounted = sample_transaction();
        over_discounted.discount = Money::new(200_000);
        assert!(!over_discounted.is_balanced());
    }

    #[test]
    fn test_transaction_serializes_with_legacy_field_names() {
        let tx = sample_transaction();
        let json = serde_json::to_string(&tx).unwrap();

        // Field names the browser implementation persisted
        assert!(json.contains("\"customerName\""));
        assert!(json.contains("\"paymentMethod\":\"ewallet\""));
        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"time\""));
        assert!(json.contains("\"status\":\"success\""));
    }
}
