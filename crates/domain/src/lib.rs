//! Domain layer for the storefront.
//!
//! This crate provides:
//! - Catalog entities and [`CatalogService`], the only writer of categories and products
//! - The session [`Cart`] with its merge/remove invariants
//! - [`StockService`] for read-only fulfillment checks and cart-wide decrements
//! - [`OrderService`], which turns a fulfillable cart into an immutable [`Order`]
//! - Load-boundary normalization of persisted JSON in [`normalize`]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod normalize;
pub mod order;
pub mod stock;

pub use cart::{Cart, CartError, CartItem};
pub use catalog::{
    CatalogError, CatalogService, Category, NewCategory, NewProduct, Product, ProductUpdate,
};
pub use common::{CategoryId, Money, OrderId, ProductId};
pub use error::{DomainError, ErrorKind};
pub use order::{Order, OrderError, OrderLine, OrderService, UNKNOWN_PRODUCT_NAME};
pub use stock::{Fulfillment, INSUFFICIENT_STOCK, Shortfall, StockError, StockService};
