//! Value objects for the order domain.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::normalize::{loose_count, loose_money};

/// Name recorded for a line whose product no longer exists at checkout.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown product";

/// A line in a placed order.
///
/// `product_name` and `unit_price` are copied at checkout and never follow
/// later catalog edits or deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// The product identifier.
    pub product_id: ProductId,

    /// Product name at the time of the order.
    #[serde(default = "unknown_product_name")]
    pub product_name: String,

    /// Price per unit at the time the product entered the cart.
    #[serde(deserialize_with = "loose_money")]
    pub unit_price: Money,

    /// Quantity ordered.
    #[serde(deserialize_with = "loose_count")]
    pub quantity: u32,
}

fn unknown_product_name() -> String {
    UNKNOWN_PRODUCT_NAME.to_string()
}

impl OrderLine {
    /// Creates a new order line.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Returns the total price for this line (quantity * unit_price), or
    /// `None` if it does not fit in a `Money`.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}
