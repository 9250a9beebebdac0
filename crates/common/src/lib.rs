//! Shared value objects for the storefront workspace.
//!
//! - String identifiers for categories, products and orders
//! - [`Money`] amounts kept in integer minor units
//! - [`IdGenerator`] sources for fresh identifiers

pub mod generator;
pub mod money;
pub mod types;

pub use generator::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use money::Money;
pub use types::{CategoryId, OrderId, ProductId};
