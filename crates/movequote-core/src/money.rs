//! # Money Module
//!
//! Provides the `Money` type for quoted amounts.
//!
//! ## Why Whole Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QUOTES ARE WHOLE RAND                                                  │
//! │                                                                         │
//! │  Rates are fractional: R4 500 / 299 km = R15.0501.../km                 │
//! │  Quotes are not:       every line item lands on a whole Rand            │
//! │                                                                         │
//! │  float math ──► Money::round_from() ──► i64 units ──► exact sums        │
//! │                                                                         │
//! │  Once an amount is Money, adding amounts can never drift.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use movequote_core::money::Money;
//!
//! let line = Money::round_from(8999.5).unwrap();  // R9 000
//! let trailer = Money::from_units(10_000);        // R10 000
//! let total = line.checked_add(trailer).unwrap();
//!
//! assert_eq!(total.units(), 19_000);
//! assert_eq!(total.to_string(), "R19,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units (Rand).
///
/// ## Design Decisions
/// - **i64 (signed)**: plain integer arithmetic, sums are exact
/// - **Checked arithmetic only**: overflow is a value, never a panic
/// - **Single field tuple struct**: serializes as a bare number, so the
///   invoice JSON reads `"subtotal": 9000`
/// - **No float constructor without rounding**: the only way in from `f64`
///   is [`Money::round_from`], which fixes the rounding mode in one place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use movequote_core::money::Money;
    ///
    /// let price = Money::from_units(4500);
    /// assert_eq!(price.units(), 4500);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Rounds a fractional amount to the nearest whole unit.
    ///
    /// Uses round-half-away-from-zero (`f64::round`). Every amount the
    /// pricing engine produces is non-negative, so this is the familiar
    /// "0.5 rounds up".
    ///
    /// Returns `None` for NaN, infinities and anything outside the `i64`
    /// range instead of saturating.
    ///
    /// ## Example
    /// ```rust
    /// use movequote_core::money::Money;
    ///
    /// assert_eq!(Money::round_from(10464.5).unwrap().units(), 10465);
    /// assert_eq!(Money::round_from(10464.49).unwrap().units(), 10464);
    /// assert!(Money::round_from(1e300).is_none());
    /// ```
    #[inline]
    pub fn round_from(amount: f64) -> Option<Self> {
        let rounded = amount.round();
        // i64::MAX as f64 is 2^63, one past the largest i64
        if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
            Some(Money(rounded as i64))
        } else {
            None
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Sums amounts, `None` if any partial sum overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns the value as `f64` for rate arithmetic.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays as `R12,345`: currency symbol, thousands separators, no decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}R{}", sign, grouped)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
