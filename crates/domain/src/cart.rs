//! Shopping cart held by the session.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::error::ErrorKind;
use crate::normalize::{loose_count, loose_money};

/// Errors that can occur while editing a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity to add must be positive.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// A product id is required to address a cart line.
    #[error("Product ID is required")]
    ProductIdRequired,

    /// The merged line quantity would not fit in a `u32`.
    #[error("Quantity overflow for product {product_id}: {current} + {added}")]
    QuantityOverflow {
        product_id: ProductId,
        current: u32,
        added: u32,
    },

    /// The cart total would not fit in a `Money`.
    #[error("Cart total too large after adding product {product_id}")]
    AmountOverflow { product_id: ProductId },
}

impl CartError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// One cart line.
///
/// `unit_price` is captured when the product is first added and does not
/// follow later catalog price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    #[serde(deserialize_with = "loose_money")]
    pub unit_price: Money,
    #[serde(deserialize_with = "loose_count")]
    pub quantity: u32,
}

impl CartItem {
    /// Returns `unit_price * quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}

#[derive(Deserialize)]
struct CartRecord {
    #[serde(default)]
    items: Vec<CartItem>,
}

/// Ordered collection of cart lines, at most one per product.
///
/// Every line has a quantity greater than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CartRecord")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl From<CartRecord> for Cart {
    fn from(record: CartRecord) -> Self {
        Cart::from_items(record.items)
    }
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from loose lines: zero-quantity lines are dropped and
    /// repeated products are merged into their first line.
    ///
    /// A line whose merge would overflow the quantity or the total is skipped.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            if let Err(e) = cart.merge(item) {
                tracing::warn!(error = %e, "skipping cart line");
            }
        }
        cart
    }

    /// Merges a line into the cart. The cart is unchanged on error.
    fn merge(&mut self, item: CartItem) -> Result<(), CartError> {
        let mut items = self.items.clone();
        match items.iter_mut().find(|it| it.product_id == item.product_id) {
            Some(existing) => {
                let current = existing.quantity;
                existing.quantity = current.checked_add(item.quantity).ok_or_else(|| {
                    CartError::QuantityOverflow {
                        product_id: item.product_id.clone(),
                        current,
                        added: item.quantity,
                    }
                })?;
            }
            None => items.push(item.clone()),
        }

        if total_of(&items).is_none() {
            return Err(CartError::AmountOverflow {
                product_id: item.product_id,
            });
        }

        self.items = items;
        Ok(())
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Adds `qty` units of `product`, merging into an existing line.
    pub fn add(&mut self, product: &Product, qty: u32) -> Result<(), CartError> {
        if qty == 0 {
            return Err(CartError::InvalidQuantity { quantity: qty });
        }

        self.merge(CartItem {
            product_id: product.id.clone(),
            unit_price: product.price,
            quantity: qty,
        })
    }

    /// Takes `qty` units off a line, deleting the line once it reaches zero.
    ///
    /// Unknown products are ignored.
    pub fn remove(&mut self, product_id: &ProductId, qty: u32) {
        let Some(index) = self.items.iter().position(|it| &it.product_id == product_id) else {
            return;
        };
        let item = &mut self.items[index];
        if item.quantity <= qty {
            self.items.remove(index);
        } else {
            item.quantity -= qty;
        }
    }

    /// Deletes a whole line.
    pub fn delete_line(&mut self, product_id: &ProductId) -> Result<(), CartError> {
        if product_id.is_blank() {
            return Err(CartError::ProductIdRequired);
        }
        self.items.retain(|it| &it.product_id != product_id);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of every line total, or `None` if it does not fit in a `Money`.
    ///
    /// Carts built through [`Cart::add`] or deserialization always have a total.
    pub fn total(&self) -> Option<Money> {
        total_of(&self.items)
    }

    /// Number of units across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|it| u64::from(it.quantity)).sum()
    }

    /// Units of `product_id` currently in the cart.
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|it| &it.product_id == product_id)
            .map_or(0, |it| it.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

fn total_of(items: &[CartItem]) -> Option<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |acc, it| acc.checked_add(it.line_total()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::CategoryId;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Money::from_cents(cents),
            stock: 10,
            category_id: CategoryId::new("cat"),
            image_url: None,
            is_featured: false,
            short_description: None,
            description: None,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        let p = product("p-1", 1000);

        cart.add(&p, 2).unwrap();
        cart.add(&p, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total().unwrap().cents(), 5000);
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut cart = Cart::new();
        let err = cart.add(&product("p-1", 100), 0).unwrap_err();
        assert_eq!(err, CartError::InvalidQuantity { quantity: 0 });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unit_price_is_snapshot() {
        let mut cart = Cart::new();
        let mut p = product("p-1", 1000);
        cart.add(&p, 1).unwrap();

        p.price = Money::from_cents(5000);
        cart.add(&p, 1).unwrap();

        assert_eq!(cart.items()[0].unit_price.cents(), 1000);
        assert_eq!(cart.total().unwrap().cents(), 2000);
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let mut cart = Cart::new();
        let p = product("p-1", 1000);
        cart.add(&p, 3).unwrap();

        cart.remove(&p.id, 1);
        assert_eq!(cart.quantity_of(&p.id), 2);

        cart.remove(&p.id, 5);
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(&p.id), 0);
    }

    #[test]
    fn test_remove_exact_quantity_deletes_line() {
        let mut cart = Cart::new();
        let p = product("p-1", 1000);
        cart.add(&p, 2).unwrap();

        cart.remove(&p.id, 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("p-1", 1000), 1).unwrap();
        cart.remove(&ProductId::new("p-2"), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_delete_line_and_clear() {
        let mut cart = Cart::new();
        cart.add(&product("p-1", 1000), 1).unwrap();
        cart.add(&product("p-2", 500), 4).unwrap();
        assert_eq!(cart.total_items(), 5);

        cart.delete_line(&ProductId::new("p-1")).unwrap();
        assert_eq!(cart.len(), 1);

        assert_eq!(
            cart.delete_line(&ProductId::new("")).unwrap_err(),
            CartError::ProductIdRequired
        );

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Some(Money::zero()));
    }

    #[test]
    fn test_deserialize_normalizes_lines() {
        let json = serde_json::json!({
            "items": [
                {"productId": "p-1", "unitPrice": 10, "quantity": 1},
                {"productId": "p-2", "unitPrice": 5.5, "quantity": 0},
                {"productId": "p-1", "unitPrice": 10, "quantity": 2}
            ]
        });
        let cart: Cart = serde_json::from_value(json).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("p-1")), 3);
        assert_eq!(cart.total().unwrap().cents(), 3000);
    }

    #[test]
    fn test_add_rejects_quantity_overflow() {
        let mut cart = Cart::new();
        let p = product("p-1", 0);
        cart.add(&p, u32::MAX).unwrap();

        let err = cart.add(&p, 5).unwrap_err();
        assert_eq!(
            err,
            CartError::QuantityOverflow {
                product_id: p.id.clone(),
                current: u32::MAX,
                added: 5,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(cart.quantity_of(&p.id), u32::MAX);
    }

    #[test]
    fn test_add_rejects_unrepresentable_total() {
        let mut cart = Cart::new();
        let p = product("p-1", 1_000_000_000_000_000_000);
        cart.add(&p, 9).unwrap();

        let err = cart.add(&p, 1).unwrap_err();
        assert_eq!(err, CartError::AmountOverflow { product_id: p.id.clone() });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(cart.quantity_of(&p.id), 9);
        assert_eq!(cart.total().unwrap().cents(), 9_000_000_000_000_000_000);

        let other = product("p-2", 1_000_000_000_000_000_000);
        assert!(matches!(
            cart.add(&other, 1),
            Err(CartError::AmountOverflow { .. })
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_deserialize_skips_overflowing_lines() {
        let json = serde_json::json!({
            "items": [
                {"productId": "p-1", "unitPrice": {"cents": 0}, "quantity": 4294967295u32},
                {"productId": "p-1", "unitPrice": {"cents": 0}, "quantity": 1},
                {"productId": "p-2", "unitPrice": 10, "quantity": 2}
            ]
        });
        let cart: Cart = serde_json::from_value(json).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of(&ProductId::new("p-1")), u32::MAX);
        assert_eq!(cart.quantity_of(&ProductId::new("p-2")), 2);
    }

    #[test]
    fn test_serialized_shape_has_items_array() {
        let mut cart = Cart::new();
        cart.add(&product("p-1", 250), 2).unwrap();
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(json["items"][0]["productId"], "p-1");
        assert_eq!(json["items"][0]["quantity"], 2);
    }
}
