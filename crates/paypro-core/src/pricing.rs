//! # Pricing Calculator
//!
//! Pure functions computing subtotal, discount, tax, and total from cart and
//! promo inputs. No side effects, no I/O.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Pricing Pipeline                                 │
//! │                                                                     │
//! │  unit_price × quantity                                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  compute_subtotal ──► compute_discount(subtotal, promo rule)        │
//! │       │                      │                                      │
//! │       │                      ▼                                      │
//! │       │               after = subtotal - discount                   │
//! │       │                      │                                      │
//! │       │                      ▼                                      │
//! │       │               compute_tax(after, 11%)                       │
//! │       │                      │                                      │
//! │       ▼                      ▼                                      │
//! │  compute_total(subtotal, discount, tax) = subtotal - discount + tax │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All rounding is round-half-up on the whole-rupiah unit, done inside
//! [`Money`]; these functions never touch floating point.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promo::{PromoKind, PromoRule};
use crate::types::{CartSelection, PricingBreakdown, TaxRate};
use crate::MAX_QUANTITY;

// =============================================================================
// Calculator Operations
// =============================================================================

/// Computes `unit_price × quantity`.
///
/// Guards the arithmetic preconditions only: a negative price or a quantity
/// outside 1..=99 is `InvalidInput`. Full form validation (name, email,
/// method) is the caller's boundary, not this function's.
pub fn compute_subtotal(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    if unit_price.is_negative() {
        return Err(CoreError::InvalidInput {
            field: "unitPrice",
            reason: format!("must not be negative, got {}", unit_price.amount()),
        });
    }

    if quantity < 1 || quantity > MAX_QUANTITY {
        return Err(CoreError::InvalidInput {
            field: "quantity",
            reason: format!("must be between 1 and {}, got {}", MAX_QUANTITY, quantity),
        });
    }

    Ok(unit_price.multiply_quantity(quantity))
}

/// Computes the discount for a subtotal under an optional promo rule.
///
/// - No rule: 0
/// - Percentage rule: `round_half_up(subtotal × value / 100)`
/// - Fixed rule: `min(value, subtotal)` — a discount never exceeds the
///   subtotal, so totals never go negative
pub fn compute_discount(subtotal: Money, rule: Option<&PromoRule>) -> Money {
    match rule {
        None => Money::zero(),
        Some(rule) => match rule.kind {
            PromoKind::Percentage => subtotal.percentage(rule.value),
            PromoKind::Fixed => Money::new(rule.value as i64).min(subtotal),
        },
    }
}

/// Computes tax on the discounted amount, rounded half-up.
///
/// The engine's domain rate is fixed 11% ([`TaxRate::default`]), but the
/// rate is a parameter so the calculator is reusable beyond this domain.
pub fn compute_tax(amount_after_discount: Money, rate: TaxRate) -> Money {
    amount_after_discount.calculate_tax(rate)
}

/// Computes `subtotal - discount + tax`.
///
/// This is the canonical invariant: every persisted transaction satisfies
/// `total == compute_total(subtotal, discount, tax)`.
#[inline]
pub fn compute_total(subtotal: Money, discount: Money, tax: Money) -> Money {
    subtotal - discount + tax
}

/// Runs the whole pipeline for one cart selection.
///
/// The caller resolves the promo rule (and its eligibility) against the
/// registry first; passing `None` prices the cart without a discount.
pub fn price_cart(
    cart: &CartSelection,
    rule: Option<&PromoRule>,
    rate: TaxRate,
) -> CoreResult<PricingBreakdown> {
    let subtotal = compute_subtotal(cart.unit_price, cart.quantity)?;
    let discount = compute_discount(subtotal, rule);
    let tax = compute_tax(subtotal - discount, rate);
    let total = compute_total(subtotal, discount, tax);

    Ok(PricingBreakdown {
        subtotal,
        discount,
        tax,
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promo::PromoRegistry;

    fn cart(unit_price: i64, quantity: i64, promo: Option<&str>) -> CartSelection {
        CartSelection {
            product_id: "premium".to_string(),
            unit_price: Money::new(unit_price),
            quantity,
            promo_code: promo.map(str::to_string),
        }
    }

    #[test]
    fn test_subtotal_basic() {
        assert_eq!(
            compute_subtotal(Money::new(150_000), 3).unwrap(),
            Money::new(450_000)
        );
    }

    #[test]
    fn test_subtotal_guards() {
        assert!(matches!(
            compute_subtotal(Money::new(-1), 1),
            Err(CoreError::InvalidInput { field: "unitPrice", .. })
        ));
        assert!(matches!(
            compute_subtotal(Money::new(1000), 0),
            Err(CoreError::InvalidInput { field: "quantity", .. })
        ));
        assert!(matches!(
            compute_subtotal(Money::new(1000), 100),
            Err(CoreError::InvalidInput { field: "quantity", .. })
        ));
        // Boundaries are valid
        assert!(compute_subtotal(Money::new(0), 1).is_ok());
        assert!(compute_subtotal(Money::new(1000), 99).is_ok());
    }

    #[test]
    fn test_discount_without_rule_is_zero() {
        assert_eq!(compute_discount(Money::new(100_000), None), Money::zero());
    }

    #[test]
    fn test_percentage_discount_never_exceeds_subtotal() {
        let registry = PromoRegistry::default();
        for code in ["DISKON10", "STUDENT20", "WELCOME15", "FLASH25"] {
            let rule = registry.lookup(code).unwrap();
            for subtotal in [0i64, 1, 999, 100_000, 5_000_000] {
                let discount = compute_discount(Money::new(subtotal), Some(rule));
                assert!(discount >= Money::zero(), "{code} on {subtotal}");
                assert!(discount <= Money::new(subtotal), "{code} on {subtotal}");
            }
        }
    }

    #[test]
    fn test_fixed_discount_is_capped_at_subtotal() {
        let registry = PromoRegistry::default();
        let rule = registry.lookup("HEMAT50K").unwrap();

        assert_eq!(
            compute_discount(Money::new(80_000), Some(rule)),
            Money::new(50_000)
        );
        // min(50.000, 30.000) = 30.000
        assert_eq!(
            compute_discount(Money::new(30_000), Some(rule)),
            Money::new(30_000)
        );
    }

    #[test]
    fn test_total_invariant() {
        // For all non-negative subtotal/discount pairs tried, the total is
        // exactly subtotal - discount + tax(subtotal - discount).
        let rate = TaxRate::default();
        for (s, d) in [(0i64, 0i64), (100, 0), (100_000, 10_000), (30_000, 30_000)] {
            let subtotal = Money::new(s);
            let discount = Money::new(d);
            let tax = compute_tax(subtotal - discount, rate);
            assert_eq!(
                compute_total(subtotal, discount, tax),
                subtotal - discount + tax
            );
        }
    }

    #[test]
    fn test_percentage_promo_breakdown() {
        // Subtotal 100.000 with DISKON10 → discount 10.000,
        // tax = round(0.11 × 90.000) = 9.900, total = 99.900
        let registry = PromoRegistry::default();
        let rule = registry.lookup("DISKON10");

        let breakdown =
            price_cart(&cart(100_000, 1, Some("DISKON10")), rule, TaxRate::default()).unwrap();

        assert_eq!(breakdown.subtotal, Money::new(100_000));
        assert_eq!(breakdown.discount, Money::new(10_000));
        assert_eq!(breakdown.tax, Money::new(9_900));
        assert_eq!(breakdown.total, Money::new(99_900));
    }

    #[test]
    fn test_fixed_promo_caps_to_zero_total() {
        // HEMAT50K (50.000) on subtotal 30.000 → discount 30.000,
        // tax = round(0.11 × 0) = 0, total = 0
        let registry = PromoRegistry::default();
        let rule = registry.lookup("HEMAT50K");

        let breakdown =
            price_cart(&cart(30_000, 1, Some("HEMAT50K")), rule, TaxRate::default()).unwrap();

        assert_eq!(breakdown.discount, Money::new(30_000));
        assert_eq!(breakdown.tax, Money::zero());
        assert_eq!(breakdown.total, Money::zero());
    }

    #[test]
    fn test_price_cart_without_promo() {
        let breakdown = price_cart(&cart(150_000, 2, None), None, TaxRate::default()).unwrap();
        assert_eq!(breakdown.subtotal, Money::new(300_000));
        assert_eq!(breakdown.discount, Money::zero());
        assert_eq!(breakdown.tax, Money::new(33_000));
        assert_eq!(breakdown.total, Money::new(333_000));
    }
}
