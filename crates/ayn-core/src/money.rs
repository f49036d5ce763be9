//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Waste costs are summed into a monthly loss figure; float drift         │
//! │  shows up as "-$37.499999" on the waste screen.                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Aguacates $2.50 → 250 cents                                          │
//! │    0.5 units × 250 cents = 125 cents, exactly                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ayn_core::money::Money;
//! use ayn_core::quantity::Quantity;
//!
//! let price = Money::from_cents(250); // $2.50 per avocado
//! let half = Quantity::from_milli(500);
//!
//! assert_eq!(price.for_quantity(half).cents(), 125);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::quantity::{Quantity, MILLI_PER_UNIT};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: a recipe margin can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// StockItem.price_per_unit_cents ──┬──► WasteItem.cost_cents (frozen)
///                                  │
///                                  ├──► RecipeCosting.ingredient_cost (live)
///                                  │
///                                  └──► Dashboard total stock value
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use ayn_core::money::Money;
    ///
    /// let price = Money::from_cents(1450); // Avocado Toast Deluxe
    /// assert_eq!(price.cents(), 1450);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Prices a (possibly fractional) quantity at this unit price.
    ///
    /// Rounds half away from zero to the nearest cent and saturates at the
    /// `i64` limits. Used for both the
    /// frozen waste cost and the live recipe ingredient cost, so the two
    /// always agree for the same price and quantity.
    ///
    /// ```rust
    /// use ayn_core::money::Money;
    /// use ayn_core::quantity::Quantity;
    ///
    /// let bacon = Money::from_cents(1500);           // $15.00 / kg
    /// let portion = Quantity::from_milli(150);        // 150 g
    /// assert_eq!(bacon.for_quantity(portion).cents(), 225);
    /// ```
    pub fn for_quantity(&self, qty: Quantity) -> Money {
        let raw = self.0 as i128 * qty.milli() as i128;
        let half = MILLI_PER_UNIT as i128 / 2;
        let rounded = if raw >= 0 {
            (raw + half) / MILLI_PER_UNIT as i128
        } else {
            (raw - half) / MILLI_PER_UNIT as i128
        };
        Money(i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display is for logs and the CLI; the web front-end formats its own.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1450)), "$14.50");
        assert_eq!(format!("{}", Money::from_cents(750)), "$7.50");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_for_quantity_whole_units() {
        let eggs = Money::from_cents(30);
        assert_eq!(eggs.for_quantity(Quantity::from_units(3)).cents(), 90);
    }

    #[test]
    fn test_for_quantity_fractional() {
        // 0.1 of a $4.50 sourdough loaf = 45 cents
        let loaf = Money::from_cents(450);
        assert_eq!(loaf.for_quantity(Quantity::from_milli(100)).cents(), 45);
    }

    #[test]
    fn test_for_quantity_rounds_half_away_from_zero() {
        // 0.005 × 100 cents = 0.5 cents → 1 cent
        let price = Money::from_cents(100);
        assert_eq!(price.for_quantity(Quantity::from_milli(5)).cents(), 1);
        // 0.004 × 100 cents = 0.4 cents → 0 cents
        assert_eq!(price.for_quantity(Quantity::from_milli(4)).cents(), 0);
    }

    #[test]
    fn test_sum_and_arithmetic() {
        let total: Money = [100, 250, 50].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 400);
        assert_eq!((total - Money::from_cents(500)).cents(), -100);
        assert!((total - Money::from_cents(500)).is_negative());
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!((huge + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!(huge.for_quantity(Quantity::max()).cents(), i64::MAX);

        let total: Money = [huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }
}
