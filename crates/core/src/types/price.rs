//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as `Decimal` so that line totals and subtotals never
//! pick up binary floating point drift. On the wire a price is a JSON number
//! (`19.99`), the record shape older clients wrote and read. Amounts that a
//! float cannot carry exactly are written as a decimal string instead, so a
//! stored cart always reads back to the same amount. Both forms deserialize.
//!
//! Totals saturate at `Decimal::MAX` rather than overflowing.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

/// A unit price in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price, saturating at the
    /// largest representable amount.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// The amount as a float, if the float reads back to exactly this amount.
    fn exact_f64(self) -> Option<f64> {
        let value = self.0.to_f64()?;
        Decimal::from_str(&value.to_string())
            .is_ok_and(|parsed| parsed == self.0)
            .then_some(value)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.exact_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Serialize::serialize(&self.0, serializer),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
