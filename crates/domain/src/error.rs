//! Domain error types.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::order::OrderError;
use crate::stock::StockError;

/// Broad category of a domain failure.
///
/// Every error in this crate is recoverable and raised before any state is
/// mutated; the kind tells the caller how to present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: empty name, negative price, zero quantity, blank id.
    Validation,
    /// A referenced category, product or order does not exist.
    NotFound,
    /// Id collision, or a delete blocked by a referencing product.
    Conflict,
    /// Requested quantities exceed available stock.
    InsufficientStock,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InsufficientStock => "insufficient_stock",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the catalog.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An error occurred while editing the cart.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// An error occurred while applying stock changes.
    #[error("Stock error: {0}")]
    Stock(#[from] StockError),

    /// An error occurred while placing or looking up an order.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

impl DomainError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Catalog(e) => e.kind(),
            DomainError::Cart(e) => e.kind(),
            DomainError::Stock(e) => e.kind(),
            DomainError::Order(e) => e.kind(),
        }
    }
}
