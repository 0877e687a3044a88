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
//! │  OUR SOLUTION: whole-unit integers                                      │
//! │    All amounts are Rupiah whole units in an i64. The currency has no   │
//! │    subunit in practice, so no cents conversion exists anywhere: the    │
//! │    stored number IS the display number.                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use berkas_core::money::Money;
//!
//! let unit_price = Money::from_units(50_000);
//! let line_total = unit_price * 2;
//! assert_eq!(line_total.units(), 100_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: a remaining balance goes negative on overpayment
///   and that is meaningful, not an error
/// - **Single-field tuple struct**: zero-cost abstraction over i64 that
///   serializes as a bare JSON number, so stored records keep the flat
///   numeric fields the original layout had
/// - **No rejection of garbage**: derivation accepts whatever numbers the
///   form produced and propagates the arithmetic result as-is
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the amount in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the amount is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the amount is negative (less than zero).
    ///
    /// A negative remaining balance signals overpayment; callers may
    /// surface it but nothing in this layer flags it specially.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies the amount by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use berkas_core::money::Money;
    ///
    /// let unit_price = Money::from_units(50_000);
    /// assert_eq!(unit_price.multiply_quantity(2).units(), 100_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Resolves a percentage of this amount to an absolute amount.
    ///
    /// This backs the percentage-entry convenience for discount and tax:
    /// the form may let the user type `10%`, but what gets stored is
    /// always `round(amount * percent / 100)` as an absolute value. The
    /// percentage itself is transient input sugar and never persisted.
    ///
    /// ## Example
    /// ```rust
    /// use berkas_core::money::Money;
    ///
    /// let sub_total = Money::from_units(150_000);
    /// assert_eq!(sub_total.percent_of(10.0).units(), 15_000);
    /// assert_eq!(sub_total.percent_of(11.5).units(), 17_250);
    /// ```
    pub fn percent_of(&self, percent: f64) -> Money {
        Money((self.0 as f64 * percent / 100.0).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation in the local convention: `Rp 1.234.567`.
///
/// ## Note
/// This is for logs and debugging. Actual document rendering formats
/// amounts in the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Groups digits with `.` separators, id-ID style.
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups: Vec<String> = Vec::new();
    while value > 0 {
        groups.push((value % 1000).to_string());
        value /= 1000;
    }
    let mut out = String::new();
    for (i, group) in groups.iter().rev().enumerate() {
        if i == 0 {
            out.push_str(group);
        } else {
            out.push('.');
            out.push_str(&format!("{:03}", group.parse::<u64>().unwrap_or(0)));
        }
    }
    out
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Summing an iterator of amounts, for subtotal and paid-to-date folds.
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
    fn test_from_units() {
        let money = Money::from_units(150_000);
        assert_eq!(money.units(), 150_000);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(100_000);
        let b = Money::from_units(40_000);

        assert_eq!((a + b).units(), 140_000);
        assert_eq!((a - b).units(), 60_000);
        assert_eq!((a * 3).units(), 300_000);
    }

    #[test]
    fn test_overpayment_goes_negative() {
        let grand_total = Money::from_units(100_000);
        let paid = Money::from_units(120_000);
        let remaining = grand_total - paid;
        assert!(remaining.is_negative());
        assert_eq!(remaining.units(), -20_000);
    }

    #[test]
    fn test_percent_of_rounds() {
        let sub_total = Money::from_units(100_000);
        assert_eq!(sub_total.percent_of(10.0).units(), 10_000);
        // 100000 * 0.0125% = 12.5 -> rounds to 13
        assert_eq!(sub_total.percent_of(0.0125).units(), 13);
        assert_eq!(sub_total.percent_of(0.0).units(), 0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [10_000, 20_000, 30_000]
            .iter()
            .map(|&u| Money::from_units(u))
            .sum();
        assert_eq!(total.units(), 60_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(1_234_567).to_string(), "Rp 1.234.567");
        assert_eq!(Money::from_units(500).to_string(), "Rp 500");
        assert_eq!(Money::from_units(0).to_string(), "Rp 0");
        assert_eq!(Money::from_units(-20_000).to_string(), "-Rp 20.000");
        assert_eq!(Money::from_units(1_000_000).to_string(), "Rp 1.000.000");
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_units(75_000)).unwrap();
        assert_eq!(json, "75000");

        let back: Money = serde_json::from_str("75000").unwrap();
        assert_eq!(back.units(), 75_000);
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Money::default().is_zero());
    }
}
