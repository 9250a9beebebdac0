//! Catalog entities and the service that owns them.

mod category;
mod product;
mod service;

pub use category::{Category, NewCategory};
pub use product::{NewProduct, Product, ProductUpdate};
pub use service::CatalogService;

use common::{CategoryId, ProductId};
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A name was empty or whitespace only.
    #[error("{entity} name is required")]
    NameRequired { entity: &'static str },

    /// An id was empty or whitespace only.
    #[error("{entity} id is required")]
    IdRequired { entity: &'static str },

    /// A price was negative or not a finite number.
    #[error("Invalid price: {cents} cents (must not be negative)")]
    InvalidPrice { cents: i64 },

    /// A stock decrement was not a positive quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// No category with this id.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// No product with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A category with this id already exists.
    #[error("Category already exists: {0}")]
    CategoryAlreadyExists(CategoryId),

    /// A product with this id already exists.
    #[error("Product already exists: {0}")]
    ProductAlreadyExists(ProductId),

    /// The category is still referenced by products.
    #[error("Category {category_id} is used by {product_count} product(s)")]
    CategoryInUse {
        category_id: CategoryId,
        product_count: usize,
    },

    /// Not enough units on hand for the requested decrement.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
}

impl CatalogError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NameRequired { .. }
            | CatalogError::IdRequired { .. }
            | CatalogError::InvalidPrice { .. }
            | CatalogError::InvalidQuantity { .. } => ErrorKind::Validation,
            CatalogError::CategoryNotFound(_) | CatalogError::ProductNotFound(_) => {
                ErrorKind::NotFound
            }
            CatalogError::CategoryAlreadyExists(_)
            | CatalogError::ProductAlreadyExists(_)
            | CatalogError::CategoryInUse { .. } => ErrorKind::Conflict,
            CatalogError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
        }
    }
}
