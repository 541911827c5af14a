//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a cart in floating point:                                      │
//! │    25.00 + 18.00 + 18.00 + 9.99 = 70.99000000000001  ❌                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2500 + 1800 + 1800 + 999 = 7099 cents  ✅                            │
//! │                                                                         │
//! │  The free-shipping threshold compares cents to cents, so a cart at      │
//! │  exactly $50.00 always gets free shipping.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use compost_core::money::Money;
//!
//! let bag = Money::from_cents(2500); // $25.00
//! let two_bags = bag * 2u32;          // $50.00
//! let with_fee = bag + Money::from_cents(999);
//!
//! assert_eq!(two_bags.cents(), 5000);
//! assert_eq!(with_fee.to_string(), "$34.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money Flows
/// ```text
/// CatalogItem.price ──► CartLine.line_total ──► Cart.subtotal
///                                                   │
///                          ShippingPolicy ──────────┤
///                                                   ▼
///                                     Cart.total ──► Order.total
/// ```
///
/// Signed so that differences (savings, amount left until free shipping)
/// can be computed without casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use compost_core::money::Money;
    ///
    /// let price = Money::from_cents(1899);
    /// assert_eq!(price.cents(), 1899);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole dollars. Catalog prices in the demo are whole-dollar amounts.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```rust
    /// use compost_core::money::Money;
    ///
    /// let line_total = Money::from_cents(1800).multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 3600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Difference clamped at zero.
    ///
    /// ```rust
    /// use compost_core::money::Money;
    ///
    /// let threshold = Money::from_cents(5000);
    /// assert_eq!(threshold.saturating_sub(Money::from_cents(2500)).cents(), 2500);
    /// assert!(threshold.saturating_sub(Money::from_cents(6100)).is_zero());
    /// ```
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Parses a decimal amount as typed into a price field ("25", "25.5", "25.00").
    ///
    /// Returns `None` for anything that is not a non-negative amount with at
    /// most two fractional digits.
    ///
    /// ```rust
    /// use compost_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("25.00"), Some(Money::from_cents(2500)));
    /// assert_eq!(Money::parse_decimal("9.9"), Some(Money::from_cents(990)));
    /// assert_eq!(Money::parse_decimal("$9.99"), None);
    /// assert_eq!(Money::parse_decimal("1.234"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let input = input.trim();
        let (whole, frac) = match input.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (input, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let dollars: i64 = whole.parse().ok()?;
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };

        dollars.checked_mul(100)?.checked_add(cents).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display. The UI formats through `StoreConfig::format_currency`.
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

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
