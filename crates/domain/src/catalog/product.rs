use common::{CategoryId, Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::normalize::{loose_count, loose_money};

/// A product in the catalog.
///
/// `stock` only changes through the catalog service (`set_stock`,
/// `decrease_stock` or a product update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(deserialize_with = "loose_money")]
    pub price: Money,
    #[serde(deserialize_with = "loose_count")]
    pub stock: u32,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Returns true if `qty` units can be taken from stock right now.
    pub fn is_in_stock(&self, qty: u32) -> bool {
        qty > 0 && self.stock >= qty
    }
}

/// Input for [`CatalogService::create_product`](super::CatalogService::create_product).
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub stock: u32,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub short_description: Option<String>,
    pub description: Option<String>,
}

impl NewProduct {
    /// Creates a product input with the required fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        stock: u32,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            category_id: category_id.into(),
            ..Self::default()
        }
    }

    /// Marks the product as featured.
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Sets the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the short and long descriptions.
    pub fn with_descriptions(
        mut self,
        short_description: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.short_description = Some(short_description.into());
        self.description = Some(description.into());
        self
    }
}

/// Partial update for [`CatalogService::update_product`](super::CatalogService::update_product).
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub name: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<u32>,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub short_description: Option<String>,
    pub description: Option<String>,
}

impl ProductUpdate {
    /// Creates an update for `id` that changes nothing yet.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn category_id(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }
}
