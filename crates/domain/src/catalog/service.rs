//! Catalog service: the single owner of categories and products.

use common::{CategoryId, Money, ProductId};

use super::{CatalogError, Category, NewCategory, NewProduct, Product, ProductUpdate};

/// Authoritative store of categories and products.
///
/// All mutations go through the methods below and are validated in full
/// before anything is written, so a failed call leaves the catalog unchanged.
/// Readers get owned copies or shared borrows, never mutable access.
#[derive(Debug, Clone, Default)]
pub struct CatalogService {
    categories: Vec<Category>,
    products: Vec<Product>,
}

fn trimmed_name(name: &str, entity: &'static str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::NameRequired { entity });
    }
    Ok(name.to_string())
}

fn check_price(price: Money) -> Result<(), CatalogError> {
    if price.is_negative() {
        return Err(CatalogError::InvalidPrice {
            cents: price.cents(),
        });
    }
    Ok(())
}

impl CatalogService {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from already-typed entities (e.g. restored from
    /// storage or seed data).
    pub fn with_catalog(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    // Reads

    /// Returns a copy of every category.
    pub fn get_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    /// Returns a copy of the products, optionally restricted to one category.
    pub fn get_products(&self, category_id: Option<&CategoryId>) -> Vec<Product> {
        match category_id {
            None => self.products.clone(),
            Some(id) => self
                .products
                .iter()
                .filter(|p| &p.category_id == id)
                .cloned()
                .collect(),
        }
    }

    /// Returns a copy of every featured product.
    pub fn get_featured_products(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.is_featured)
            .cloned()
            .collect()
    }

    pub fn get_category_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn get_product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Read-only view of the categories, in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Read-only view of the products, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns true if any product references the category.
    pub fn category_in_use(&self, id: &CategoryId) -> bool {
        self.products.iter().any(|p| &p.category_id == id)
    }

    fn product_mut(&mut self, id: &ProductId) -> Result<&mut Product, CatalogError> {
        self.products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    fn require_category(&self, id: &CategoryId) -> Result<(), CatalogError> {
        if self.get_category_by_id(id).is_none() {
            return Err(CatalogError::CategoryNotFound(id.clone()));
        }
        Ok(())
    }

    // Categories

    /// Adds a new category.
    #[tracing::instrument(skip(self, input), fields(category_id = %input.id))]
    pub fn create_category(&mut self, input: NewCategory) -> Result<Category, CatalogError> {
        let name = trimmed_name(&input.name, "Category")?;
        if input.id.is_blank() {
            return Err(CatalogError::IdRequired { entity: "Category" });
        }
        if self.get_category_by_id(&input.id).is_some() {
            return Err(CatalogError::CategoryAlreadyExists(input.id));
        }

        let category = Category {
            id: input.id,
            name,
            color: input.color,
            icon: input.icon,
            image_url: input.image_url,
        };
        self.categories.push(category.clone());
        tracing::debug!("category created");
        Ok(category)
    }

    /// Renames a category.
    #[tracing::instrument(skip(self))]
    pub fn update_category(
        &mut self,
        id: &CategoryId,
        name: &str,
    ) -> Result<Category, CatalogError> {
        let name = trimmed_name(name, "Category")?;
        let category = self
            .categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| CatalogError::CategoryNotFound(id.clone()))?;

        category.name = name;
        tracing::debug!("category renamed");
        Ok(category.clone())
    }

    /// Removes a category that no product references.
    #[tracing::instrument(skip(self))]
    pub fn delete_category(&mut self, id: &CategoryId) -> Result<(), CatalogError> {
        let product_count = self
            .products
            .iter()
            .filter(|p| &p.category_id == id)
            .count();
        if product_count > 0 {
            return Err(CatalogError::CategoryInUse {
                category_id: id.clone(),
                product_count,
            });
        }

        let before = self.categories.len();
        self.categories.retain(|c| &c.id != id);
        if self.categories.len() == before {
            return Err(CatalogError::CategoryNotFound(id.clone()));
        }
        tracing::debug!("category deleted");
        Ok(())
    }

    // Products

    /// Adds a new product to an existing category.
    #[tracing::instrument(skip(self, input), fields(product_id = %input.id))]
    pub fn create_product(&mut self, input: NewProduct) -> Result<Product, CatalogError> {
        let name = trimmed_name(&input.name, "Product")?;
        if input.id.is_blank() {
            return Err(CatalogError::IdRequired { entity: "Product" });
        }
        check_price(input.price)?;
        self.require_category(&input.category_id)?;
        if self.get_product_by_id(&input.id).is_some() {
            return Err(CatalogError::ProductAlreadyExists(input.id));
        }

        let product = Product {
            id: input.id,
            name,
            price: input.price,
            stock: input.stock,
            category_id: input.category_id,
            image_url: input.image_url,
            is_featured: input.is_featured,
            short_description: input.short_description,
            description: input.description,
        };
        self.products.push(product.clone());
        tracing::debug!(stock = product.stock, "product created");
        Ok(product)
    }

    /// Applies the provided fields of `update`; omitted fields are kept.
    ///
    /// Every provided field is validated before any is written.
    #[tracing::instrument(skip(self, update), fields(product_id = %update.id))]
    pub fn update_product(&mut self, update: ProductUpdate) -> Result<Product, CatalogError> {
        if self.get_product_by_id(&update.id).is_none() {
            return Err(CatalogError::ProductNotFound(update.id));
        }
        let name = update
            .name
            .as_deref()
            .map(|n| trimmed_name(n, "Product"))
            .transpose()?;
        if let Some(price) = update.price {
            check_price(price)?;
        }
        if let Some(category_id) = &update.category_id {
            self.require_category(category_id)?;
        }

        let product = self.product_mut(&update.id)?;
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        if let Some(image_url) = update.image_url {
            product.image_url = Some(image_url);
        }
        if let Some(is_featured) = update.is_featured {
            product.is_featured = is_featured;
        }
        if let Some(short_description) = update.short_description {
            product.short_description = Some(short_description);
        }
        if let Some(description) = update.description {
            product.description = Some(description);
        }
        tracing::debug!("product updated");
        Ok(product.clone())
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_product(&mut self, id: &ProductId) -> Result<(), CatalogError> {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        if self.products.len() == before {
            return Err(CatalogError::ProductNotFound(id.clone()));
        }
        tracing::debug!("product deleted");
        Ok(())
    }

    // Stock

    /// Sets the absolute stock level of a product.
    #[tracing::instrument(skip(self))]
    pub fn set_stock(
        &mut self,
        product_id: &ProductId,
        stock: u32,
    ) -> Result<Product, CatalogError> {
        let product = self.product_mut(product_id)?;
        product.stock = stock;
        tracing::debug!("stock set");
        Ok(product.clone())
    }

    /// Takes `qty` units out of stock.
    ///
    /// Fails without touching the product if `qty` is zero or exceeds the
    /// units on hand; stock never drops below zero.
    #[tracing::instrument(skip(self))]
    pub fn decrease_stock(
        &mut self,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Product, CatalogError> {
        if qty == 0 {
            return Err(CatalogError::InvalidQuantity { quantity: qty });
        }
        let product = self.product_mut(product_id)?;
        if product.stock < qty {
            return Err(CatalogError::InsufficientStock {
                product_id: product_id.clone(),
                requested: qty,
                available: product.stock,
            });
        }

        product.stock -= qty;
        tracing::debug!(remaining = product.stock, "stock decreased");
        Ok(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn catalog() -> CatalogService {
        let mut catalog = CatalogService::new();
        catalog
            .create_category(NewCategory::new("cat-books", "Books"))
            .unwrap();
        catalog
            .create_category(NewCategory::new("cat-it", "Computers"))
            .unwrap();
        catalog
            .create_product(
                NewProduct::new("p-1", "Clean Code", Money::from_cents(2990), 5, "cat-books")
                    .featured(),
            )
            .unwrap();
        catalog
            .create_product(NewProduct::new(
                "p-2",
                "Keyboard",
                Money::from_cents(8900),
                4,
                "cat-it",
            ))
            .unwrap();
        catalog
    }

    #[test]
    fn test_get_products_filters_by_category() {
        let catalog = catalog();
        assert_eq!(catalog.get_products(None).len(), 2);

        let books = catalog.get_products(Some(&CategoryId::new("cat-books")));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id.as_str(), "p-1");

        assert!(catalog
            .get_products(Some(&CategoryId::new("cat-none")))
            .is_empty());
    }

    #[test]
    fn test_featured_products() {
        let featured = catalog().get_featured_products();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "Clean Code");
    }

    #[test]
    fn test_lookups_return_none_when_absent() {
        let catalog = catalog();
        assert!(catalog.get_category_by_id(&CategoryId::new("nope")).is_none());
        assert!(catalog.get_product_by_id(&ProductId::new("nope")).is_none());
    }

    #[test]
    fn test_copies_do_not_alias_catalog() {
        let catalog = catalog();
        let mut products = catalog.get_products(None);
        products[0].stock = 0;
        products[0].name = "changed".to_string();

        let original = catalog.get_product_by_id(&ProductId::new("p-1")).unwrap();
        assert_eq!(original.stock, 5);
        assert_eq!(original.name, "Clean Code");
    }

    #[test]
    fn test_create_category_trims_name() {
        let mut catalog = CatalogService::new();
        let category = catalog
            .create_category(NewCategory::new("cat-x", "  X  ").with_color("#fff"))
            .unwrap();
        assert_eq!(category.name, "X");
        assert_eq!(category.color.as_deref(), Some("#fff"));
    }

    #[test]
    fn test_create_category_rejects_blank_name_and_duplicate_id() {
        let mut catalog = catalog();

        let err = catalog
            .create_category(NewCategory::new("cat-new", "   "))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = catalog
            .create_category(NewCategory::new("cat-books", "Again"))
            .unwrap_err();
        assert_eq!(err, CatalogError::CategoryAlreadyExists("cat-books".into()));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(catalog.categories().len(), 2);
    }

    #[test]
    fn test_update_category() {
        let mut catalog = catalog();
        let updated = catalog
            .update_category(&CategoryId::new("cat-it"), " IT ")
            .unwrap();
        assert_eq!(updated.name, "IT");

        let err = catalog
            .update_category(&CategoryId::new("missing"), "Name")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = catalog
            .update_category(&CategoryId::new("cat-it"), "")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_delete_category_guarded_by_products() {
        let mut catalog = catalog();
        let books = CategoryId::new("cat-books");

        let err = catalog.delete_category(&books).unwrap_err();
        assert_eq!(
            err,
            CatalogError::CategoryInUse {
                category_id: books.clone(),
                product_count: 1
            }
        );
        assert!(catalog.get_category_by_id(&books).is_some());

        catalog.delete_product(&ProductId::new("p-1")).unwrap();
        catalog.delete_category(&books).unwrap();
        assert!(catalog.get_category_by_id(&books).is_none());

        let err = catalog.delete_category(&books).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_create_product_validation() {
        let mut catalog = catalog();

        let err = catalog
            .create_product(NewProduct::new("p-9", " ", Money::zero(), 1, "cat-it"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = catalog
            .create_product(NewProduct::new(
                "p-9",
                "Mouse",
                Money::from_cents(-1),
                1,
                "cat-it",
            ))
            .unwrap_err();
        assert_eq!(err, CatalogError::InvalidPrice { cents: -1 });

        let err = catalog
            .create_product(NewProduct::new("p-9", "Mouse", Money::zero(), 1, "cat-none"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = catalog
            .create_product(NewProduct::new("p-1", "Mouse", Money::zero(), 1, "cat-it"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        assert_eq!(catalog.products().len(), 2);
    }

    #[test]
    fn test_free_product_is_allowed() {
        let mut catalog = catalog();
        let product = catalog
            .create_product(NewProduct::new("p-9", "Sticker", Money::zero(), 0, "cat-it"))
            .unwrap();
        assert!(product.price.is_zero());
    }

    #[test]
    fn test_partial_update_changes_only_given_fields() {
        let mut catalog = catalog();
        let updated = catalog
            .update_product(ProductUpdate::new("p-1").stock(9))
            .unwrap();

        assert_eq!(updated.stock, 9);
        assert_eq!(updated.name, "Clean Code");
        assert_eq!(updated.price, Money::from_cents(2990));
        assert_eq!(updated.category_id.as_str(), "cat-books");
        assert!(updated.is_featured);
    }

    #[test]
    fn test_failed_update_applies_nothing() {
        let mut catalog = catalog();
        let err = catalog
            .update_product(
                ProductUpdate::new("p-1")
                    .name("Renamed")
                    .stock(1)
                    .category_id("cat-none"),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let product = catalog.get_product_by_id(&ProductId::new("p-1")).unwrap();
        assert_eq!(product.name, "Clean Code");
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn test_update_missing_product() {
        let mut catalog = catalog();
        let err = catalog
            .update_product(ProductUpdate::new("ghost").stock(1))
            .unwrap_err();
        assert_eq!(err, CatalogError::ProductNotFound("ghost".into()));
    }

    #[test]
    fn test_delete_product() {
        let mut catalog = catalog();
        catalog.delete_product(&ProductId::new("p-2")).unwrap();
        assert_eq!(catalog.products().len(), 1);

        let err = catalog.delete_product(&ProductId::new("p-2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_set_stock() {
        let mut catalog = catalog();
        let product = catalog.set_stock(&ProductId::new("p-2"), 0).unwrap();
        assert_eq!(product.stock, 0);

        let err = catalog.set_stock(&ProductId::new("ghost"), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_decrease_stock_never_underflows() {
        let mut catalog = catalog();
        let id = ProductId::new("p-2");

        assert_eq!(catalog.decrease_stock(&id, 3).unwrap().stock, 1);

        let err = catalog.decrease_stock(&id, 2).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientStock {
                product_id: id.clone(),
                requested: 2,
                available: 1
            }
        );
        assert_eq!(catalog.get_product_by_id(&id).unwrap().stock, 1);

        assert_eq!(catalog.decrease_stock(&id, 1).unwrap().stock, 0);
        assert!(catalog.decrease_stock(&id, 1).is_err());
        assert_eq!(catalog.get_product_by_id(&id).unwrap().stock, 0);
    }

    #[test]
    fn test_decrease_stock_rejects_zero_quantity() {
        let mut catalog = catalog();
        let err = catalog
            .decrease_stock(&ProductId::new("p-1"), 0)
            .unwrap_err();
        assert_eq!(err, CatalogError::InvalidQuantity { quantity: 0 });
    }
}
