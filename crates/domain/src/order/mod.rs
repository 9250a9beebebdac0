//! Orders: immutable snapshots of a cart at checkout time.

mod aggregate;
mod service;
mod value_objects;

pub use aggregate::Order;
pub use service::OrderService;
pub use value_objects::{OrderLine, UNKNOWN_PRODUCT_NAME};

use common::OrderId;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::stock::{INSUFFICIENT_STOCK, Shortfall, StockError};

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The cart has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Order ID is required.
    #[error("Order ID is required")]
    OrderIdRequired,

    /// An order with this id was already placed.
    #[error("Order already exists: {0}")]
    AlreadyExists(OrderId),

    /// One or more cart lines exceed available stock.
    #[error("Insufficient stock for {} line(s)", shortfalls.len())]
    InsufficientStock { shortfalls: Vec<Shortfall> },

    /// A line total or the order total does not fit in a `Money`.
    #[error("Order total is too large")]
    AmountOverflow,

    /// Applying the cart to stock failed.
    #[error("Stock error: {0}")]
    Stock(#[from] StockError),
}

impl OrderError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::EmptyCart
            | OrderError::OrderIdRequired
            | OrderError::AmountOverflow => ErrorKind::Validation,
            OrderError::AlreadyExists(_) => ErrorKind::Conflict,
            OrderError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            OrderError::Stock(e) => e.kind(),
        }
    }

    /// Machine-readable code for stock failures.
    pub fn code(&self) -> Option<&'static str> {
        match self.kind() {
            ErrorKind::InsufficientStock => Some(INSUFFICIENT_STOCK),
            _ => None,
        }
    }

    /// Per-line shortfall details; empty for other failures.
    pub fn shortfalls(&self) -> &[Shortfall] {
        match self {
            OrderError::InsufficientStock { shortfalls }
            | OrderError::Stock(StockError::Unfulfillable { shortfalls }) => shortfalls,
            _ => &[],
        }
    }
}
