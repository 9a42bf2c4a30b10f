//! # Money Module
//!
//! Provides the `Money` type for handling rupiah amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: integer amounts in the minor currency unit.          │
//! │  The rupiah has no fractional subunits, so the minor unit IS the    │
//! │  whole rupiah: Money(150000) = Rp 150.000. Rounding only ever       │
//! │  happens in one place (percentage math), and it is round-half-up    │
//! │  to match how totals were always presented to customers.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use paypro_core::money::Money;
//!
//! let price = Money::new(150_000); // Rp 150.000
//!
//! // Arithmetic operations
//! let line = price * 3;                    // Rp 450.000
//! let total = line + Money::new(50_000);   // Rp 500.000
//!
//! // NEVER construct from floats - no such method exists.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole rupiah (the currency's minor unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values can appear transiently in arithmetic,
///   but no persisted transaction field is ever negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, total ordering for `min`/`max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole-rupiah amount.
    ///
    /// ## Example
    /// ```rust
    /// use paypro_core::money::Money;
    ///
    /// let price = Money::new(150_000);
    /// assert_eq!(price.amount(), 150_000);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount in whole rupiah.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax using round-half-up on the minor unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides
    /// the half-up rounding (5000/10000 = 0.5). This matches `Math.round`
    /// for the non-negative amounts this engine feeds it.
    ///
    /// ## Example
    /// ```rust
    /// use paypro_core::money::Money;
    /// use paypro_core::types::TaxRate;
    ///
    /// let base = Money::new(90_000);
    /// let rate = TaxRate::from_bps(1100); // 11% VAT
    ///
    /// // 90.000 × 11% = 9.900
    /// assert_eq!(base.calculate_tax(rate).amount(), 9_900);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps the intermediate product from overflowing on large carts
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::new(tax as i64)
    }

    /// Returns a whole-percentage share of this amount, rounded half-up.
    ///
    /// Used for percentage promo discounts: `pct` is a plain percentage
    /// (10 = 10%), not basis points.
    ///
    /// ## Example
    /// ```rust
    /// use paypro_core::money::Money;
    ///
    /// let subtotal = Money::new(100_000);
    /// assert_eq!(subtotal.percentage(10).amount(), 10_000);
    /// ```
    pub fn percentage(&self, pct: u32) -> Money {
        let share = (self.0 as i128 * pct as i128 + 50) / 100;
        Money::new(share as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use paypro_core::money::Money;
    ///
    /// let unit_price = Money::new(150_000);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 450_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders id-ID currency formatting: `Rp 1.500.000`.
///
/// This is the same rendering the original UI produced with
/// `Intl.NumberFormat('id-ID', { currency: 'IDR' })` - dot-grouped thousands,
/// no fractional digits.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Groups digits in threes with `.` separators (id-ID convention).
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000) as u16);
        value /= 1000;
    }

    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push('.');
        out.push_str(&format!("{:03}", g));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_amount() {
        let money = Money::new(150_000);
        assert_eq!(money.amount(), 150_000);
    }

    #[test]
    fn test_display_id_id_grouping() {
        assert_eq!(format!("{}", Money::new(0)), "Rp 0");
        assert_eq!(format!("{}", Money::new(999)), "Rp 999");
        assert_eq!(format!("{}", Money::new(1_000)), "Rp 1.000");
        assert_eq!(format!("{}", Money::new(50_000)), "Rp 50.000");
        assert_eq!(format!("{}", Money::new(1_500_000)), "Rp 1.500.000");
        assert_eq!(format!("{}", Money::new(-550)), "-Rp 550");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(100_000);
        let b = Money::new(50_000);

        assert_eq!((a + b).amount(), 150_000);
        assert_eq!((a - b).amount(), 50_000);
        assert_eq!((a * 3).amount(), 300_000);

        let mut c = a;
        c += b;
        assert_eq!(c.amount(), 150_000);
        c -= b;
        assert_eq!(c.amount(), 100_000);
    }

    #[test]
    fn test_tax_calculation_eleven_percent() {
        // 90.000 at 11% = 9.900 (exact)
        let amount = Money::new(90_000);
        let tax = amount.calculate_tax(TaxRate::from_bps(1100));
        assert_eq!(tax.amount(), 9_900);
    }

    #[test]
    fn test_tax_calculation_rounds_half_up() {
        // 50 at 11% = 5.5 → rounds up to 6
        let amount = Money::new(50);
        let tax = amount.calculate_tax(TaxRate::from_bps(1100));
        assert_eq!(tax.amount(), 6);

        // 40 at 11% = 4.4 → rounds down to 4
        let amount = Money::new(40);
        let tax = amount.calculate_tax(TaxRate::from_bps(1100));
        assert_eq!(tax.amount(), 4);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 25 at 10% = 2.5 → 3
        assert_eq!(Money::new(25).percentage(10).amount(), 3);
        // 24 at 10% = 2.4 → 2
        assert_eq!(Money::new(24).percentage(10).amount(), 2);
        // full range: 0% and 100%
        assert_eq!(Money::new(12_345).percentage(0).amount(), 0);
        assert_eq!(Money::new(12_345).percentage(100).amount(), 12_345);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::new(150_000);
        assert_eq!(unit_price.multiply_quantity(4).amount(), 600_000);
    }

    #[test]
    fn test_ordering_for_min_cap() {
        // Ord lets the discount cap use std::cmp::min directly
        let fixed = Money::new(50_000);
        let subtotal = Money::new(30_000);
        assert_eq!(std::cmp::min(fixed, subtotal), subtotal);
    }
}
