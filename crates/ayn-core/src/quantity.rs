//! # Quantity Module
//!
//! Stock quantities in thousandths of a unit.
//!
//! ## Why Not f64?
//! Recipes consume fractional units (half an avocado, a tenth of a loaf).
//! Stored as floats, `12 - 0.1 - 0.1 - ...` drifts and a "byte-identical"
//! export/import round trip is no longer guaranteed. Storing milli-units as
//! an integer keeps every adjustment exact:
//!
//! ```text
//! 0.5 aguacate  → 500
//! 0.1 hogaza    → 100
//! 1 huevo       → 1000
//! ```
//!
//! On the wire (persisted JSON, backup document) a quantity is still a plain
//! JSON number (`44.5`), matching what the web front-end reads and writes.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of stored steps per whole unit.
pub const MILLI_PER_UNIT: i64 = 1000;

/// Largest magnitude a quantity may hold, in whole units.
///
/// Keeps every level, delta and derived figure (`min × 3`, `units × price`)
/// far inside `i64`.
pub const MAX_UNITS: i64 = 1_000_000_000;

const MAX_MILLI: i64 = MAX_UNITS * MILLI_PER_UNIT;

/// A stock quantity or delta, in thousandths of a unit.
///
/// Signed so the same type carries deltas (`-0.5` for a sale) and levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(i64);

impl Quantity {
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * MILLI_PER_UNIT)
    }

    /// Converts a decimal amount, rounding to the nearest thousandth.
    ///
    /// Returns `None` for NaN, infinities and anything beyond
    /// [`MAX_UNITS`] in either direction.
    pub fn from_f64(units: f64) -> Option<Self> {
        if !units.is_finite() || units.abs() > MAX_UNITS as f64 {
            return None;
        }
        Some(Quantity((units * MILLI_PER_UNIT as f64).round() as i64))
    }

    /// The largest quantity accepted anywhere.
    #[inline]
    pub const fn max() -> Self {
        Quantity(MAX_MILLI)
    }

    /// Within `±MAX_UNITS`.
    #[inline]
    pub const fn in_range(&self) -> bool {
        self.0 >= -MAX_MILLI && self.0 <= MAX_MILLI
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Decimal value for display and JSON only. Never compute with it.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / MILLI_PER_UNIT as f64
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a delta, flooring the result at zero and capping it at
    /// [`Quantity::max`].
    ///
    /// Returns the new level and whether either limit was hit.
    ///
    /// ```rust
    /// use ayn_core::quantity::Quantity;
    ///
    /// let (level, clamped) = Quantity::from_units(2).apply_delta(Quantity::from_units(-5));
    /// assert_eq!(level, Quantity::zero());
    /// assert!(clamped);
    /// ```
    pub fn apply_delta(self, delta: Quantity) -> (Quantity, bool) {
        let raw = self.0.saturating_add(delta.0);
        if raw < 0 {
            (Quantity(0), true)
        } else if raw > MAX_MILLI {
            (Quantity(MAX_MILLI), true)
        } else {
            (Quantity(raw), false)
        }
    }

    /// Smallest whole number of units that is `>= self`.
    pub fn ceil_units(&self) -> i64 {
        let whole = self.0.div_euclid(MILLI_PER_UNIT);
        if self.0.rem_euclid(MILLI_PER_UNIT) == 0 {
            whole
        } else {
            whole + 1
        }
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity(-self.0)
    }
}

/// Renders the shortest exact decimal: `44.5`, `119`, `0.15`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / MILLI_PER_UNIT as u64;
        let frac = abs % MILLI_PER_UNIT as u64;

        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }

        let digits = format!("{:03}", frac);
        write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: f64 = s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("'{}' is not a number", s.trim()),
        })?;

        Quantity::from_f64(parsed).ok_or_else(|| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("must be a finite number of at most {} units", MAX_UNITS),
        })
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MILLI_PER_UNIT == 0 {
            serializer.serialize_i64(self.0 / MILLI_PER_UNIT)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Quantity::from_f64(raw).ok_or_else(|| de::Error::custom("quantity out of range"))
    }
}
