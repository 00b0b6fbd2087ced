//! Menu catalog read models.
//!
//! The catalog is owned by an external collaborator; the core only reads it
//! to price checkout selections. Prices are held in minor currency units so
//! order totals never touch floating point.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Stable identifier for a menu item, assigned by the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct MenuItemId(u32);

impl MenuItemId {
    /// Wrap a raw catalog identifier.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`Price::from_cents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceValidationError {
    /// Prices cannot be negative.
    #[error("price must not be negative")]
    Negative,
}

/// Monetary amount in minor currency units (cents).
///
/// ## Invariants
/// - Never negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    /// Validate and construct a price from a cent amount.
    pub fn from_cents(cents: i64) -> Result<Self, PriceValidationError> {
        if cents < 0 {
            return Err(PriceValidationError::Negative);
        }
        Ok(Self(cents))
    }

    /// The zero price, used as the additive identity when summing totals.
    pub const ZERO: Price = Price(0);

    /// Amount in cents.
    pub fn cents(self) -> i64 {
        self.0
    }

    /// Multiply the unit price by a line quantity.
    ///
    /// Quantities are bounded by `u32` and validated prices fit comfortably
    /// in `i64`, so saturation only triggers on absurd catalog data.
    pub fn total(self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Add another amount, saturating at `i64::MAX`.
    pub fn plus(self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }
}

impl From<Price> for i64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Price {
    type Error = PriceValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_cents(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A menu entry as served by the Catalog Reader.
///
/// Read-only to the core: checkout copies `name` and `price` into line-item
/// snapshots instead of holding a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    /// Unit price in cents.
    pub price: Price,
    pub category: String,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn negative_price_is_rejected() {
        let err = Price::from_cents(-1).expect_err("negative rejected");
        assert_eq!(err, PriceValidationError::Negative);
    }

    #[rstest]
    #[case(500, 2, 1000)]
    #[case(1200, 1, 1200)]
    #[case(0, 7, 0)]
    fn line_totals_multiply_cents(#[case] cents: i64, #[case] qty: u32, #[case] expected: i64) {
        let price = Price::from_cents(cents).expect("valid price");
        assert_eq!(price.total(qty).cents(), expected);
    }

    #[rstest]
    fn price_serialises_as_cents() {
        let price = Price::from_cents(1250).expect("valid price");
        let value = serde_json::to_value(price).expect("serialise");
        assert_eq!(value, serde_json::json!(1250));
    }

    #[rstest]
    fn price_displays_with_decimals() {
        let price = Price::from_cents(1205).expect("valid price");
        assert_eq!(price.to_string(), "12.05");
    }
}
