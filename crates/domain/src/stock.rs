//! Stock checks and decrements for a whole cart.

use common::ProductId;
use serde::Serialize;
use thiserror::Error;

use crate::cart::Cart;
use crate::catalog::{CatalogError, CatalogService};
use crate::error::ErrorKind;

/// Reason code reported for carts that cannot be fulfilled.
pub const INSUFFICIENT_STOCK: &str = "INSUFFICIENT_STOCK";

/// One cart line whose quantity exceeds the units on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortfall {
    pub product_id: ProductId,
    pub requested: u32,
    /// Units on hand; zero when the product no longer exists.
    pub available: u32,
}

/// Outcome of [`StockService::can_fulfill`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fulfillment {
    /// Every line can be served from current stock.
    Ok,
    /// At least one line is short.
    Insufficient { missing: Vec<Shortfall> },
}

impl Fulfillment {
    pub fn is_ok(&self) -> bool {
        matches!(self, Fulfillment::Ok)
    }

    /// Reason code, `None` when fulfillable.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Fulfillment::Ok => None,
            Fulfillment::Insufficient { .. } => Some(INSUFFICIENT_STOCK),
        }
    }

    /// Lines that cannot be served; empty when fulfillable.
    pub fn missing(&self) -> &[Shortfall] {
        match self {
            Fulfillment::Ok => &[],
            Fulfillment::Insufficient { missing } => missing,
        }
    }
}

/// Errors raised when applying a cart to stock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// The cart was no longer fulfillable when stock was applied.
    #[error("Cannot fulfill cart: {} line(s) short", shortfalls.len())]
    Unfulfillable { shortfalls: Vec<Shortfall> },

    /// The catalog rejected a decrement.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl StockError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::Unfulfillable { .. } => ErrorKind::InsufficientStock,
            StockError::Catalog(e) => e.kind(),
        }
    }
}

/// Stateless checker/applier of cart quantities against catalog stock.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockService;

impl StockService {
    pub fn new() -> Self {
        Self
    }

    /// Compares every cart line with current stock. Read-only.
    pub fn can_fulfill(&self, cart: &Cart, catalog: &CatalogService) -> Fulfillment {
        let missing: Vec<Shortfall> = cart
            .items()
            .iter()
            .filter_map(|item| {
                let available = catalog
                    .get_product_by_id(&item.product_id)
                    .map_or(0, |p| p.stock);
                (available < item.quantity).then(|| Shortfall {
                    product_id: item.product_id.clone(),
                    requested: item.quantity,
                    available,
                })
            })
            .collect();

        if missing.is_empty() {
            Fulfillment::Ok
        } else {
            Fulfillment::Insufficient { missing }
        }
    }

    /// Decrements stock for every cart line.
    ///
    /// Re-checks fulfillability first and fails without touching any product
    /// if a line is short.
    #[tracing::instrument(skip_all, fields(lines = cart.len()))]
    pub fn apply_cart_stock(
        &self,
        cart: &Cart,
        catalog: &mut CatalogService,
    ) -> Result<(), StockError> {
        if let Fulfillment::Insufficient { missing } = self.can_fulfill(cart, catalog) {
            return Err(StockError::Unfulfillable { shortfalls: missing });
        }

        for item in cart.items() {
            catalog.decrease_stock(&item.product_id, item.quantity)?;
        }
        tracing::debug!("cart stock applied");
        Ok(())
    }
}
