//! # Promo Code Registry
//!
//! Static lookup of promo codes to discount rules, with eligibility checks.
//!
//! ## Rule Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Process start: PromoRegistry::default() builds the table once      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  lookup("diskon10")  ── uppercase-normalized exact match            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  check_eligibility(rule, subtotal)                                  │
//! │       ├── subtotal < min_subtotal → BelowMinimumPurchase            │
//! │       └── ok → caller stores the code on the cart                   │
//! │                                                                     │
//! │  NOTE: eligibility must be re-checked on EVERY subtotal change -    │
//! │  editing the quantity can make a previously-valid code ineligible.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The original kept this as an object literal with a hardcoded minimum
//! check for one code; the registry generalizes that into a `min_subtotal`
//! field every rule may carry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Promo Rule
// =============================================================================

/// How a promo rule discounts the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PromoKind {
    /// `value` is a percentage of the subtotal, 0..=100.
    Percentage,
    /// `value` is a fixed rupiah amount, capped at the subtotal.
    Fixed,
}

/// A named discount policy. Defined at process start, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromoRule {
    /// Unique uppercase code.
    pub code: String,

    /// Percentage or fixed-amount discount.
    pub kind: PromoKind,

    /// Percentage 0..=100, or fixed rupiah amount.
    pub value: u32,

    /// Eligibility floor: minimum subtotal before the rule may apply.
    pub min_subtotal: Option<Money>,

    /// Display string shown when the code is applied.
    pub description: String,
}

// =============================================================================
// Promo Registry
// =============================================================================

/// Process-wide immutable promo table.
#[derive(Debug, Clone)]
pub struct PromoRegistry {
    rules: HashMap<String, PromoRule>,
}

impl PromoRegistry {
    /// Builds a registry from a list of rules.
    pub fn new(rules: impl IntoIterator<Item = PromoRule>) -> Self {
        PromoRegistry {
            rules: rules.into_iter().map(|r| (r.code.clone(), r)).collect(),
        }
    }

    /// Looks up a rule by code. Matching is case-normalized (uppercase)
    /// and exact; surrounding whitespace is ignored.
    pub fn lookup(&self, code: &str) -> Option<&PromoRule> {
        self.rules.get(code.trim().to_uppercase().as_str())
    }

    /// Checks whether a rule may be applied to the given subtotal.
    ///
    /// Fails with [`CoreError::BelowMinimumPurchase`] when the rule carries
    /// a purchase floor the subtotal does not reach.
    pub fn check_eligibility(&self, rule: &PromoRule, subtotal: Money) -> CoreResult<()> {
        if let Some(minimum) = rule.min_subtotal {
            if subtotal < minimum {
                return Err(CoreError::BelowMinimumPurchase {
                    code: rule.code.clone(),
                    minimum,
                });
            }
        }
        Ok(())
    }

    /// Convenience: lookup + eligibility in one call.
    ///
    /// Returns the rule on success so the caller can show its description.
    pub fn resolve(&self, code: &str, subtotal: Money) -> CoreResult<&PromoRule> {
        let rule = self
            .lookup(code)
            .ok_or_else(|| CoreError::InvalidInput {
                field: "promoCode",
                reason: format!("unknown or expired promo code: {}", code.trim().to_uppercase()),
            })?;
        self.check_eligibility(rule, subtotal)?;
        Ok(rule)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PromoRegistry {
    /// The six promo codes the payment form honors.
    fn default() -> Self {
        let percentage = |code: &str, value: u32, description: &str| PromoRule {
            code: code.to_string(),
            kind: PromoKind::Percentage,
            value,
            min_subtotal: None,
            description: description.to_string(),
        };
        let fixed = |code: &str, value: u32, min: Option<i64>, description: &str| PromoRule {
            code: code.to_string(),
            kind: PromoKind::Fixed,
            value,
            min_subtotal: min.map(Money::new),
            description: description.to_string(),
        };

        PromoRegistry::new([
            percentage("DISKON10", 10, "Potongan 10% untuk semua produk"),
            fixed("HEMAT50K", 50_000, None, "Diskon tetap sebesar Rp 50.000"),
            percentage("STUDENT20", 20, "Diskon 20% khusus pelajar"),
            percentage("WELCOME15", 15, "Selamat datang! Diskon 15%"),
            fixed(
                "SAVE100K",
                100_000,
                Some(500_000),
                "Hemat Rp 100.000 untuk pembelian di atas Rp 500.000",
            ),
            percentage("FLASH25", 25, "Flash Sale! Diskon 25% terbatas"),
        ])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
