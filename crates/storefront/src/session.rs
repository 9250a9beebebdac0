//! Application session: domain services plus their persisted state.

use std::sync::{Arc, Mutex, MutexGuard};

use common::{CategoryId, IdGenerator, OrderId, ProductId};
use domain::{
    Cart, CatalogError, CatalogService, Category, NewCategory, NewProduct, Order, OrderService,
    Product, ProductUpdate, StockService, normalize,
};
use serde_json::{Value, json};
use storage::{KeyValueStore, Storage};

use crate::error::{AppError, Result};
use crate::seed;

/// One storefront: catalog, order history and cart, kept in sync with storage.
///
/// Every mutating method writes the changed documents before returning and
/// updates memory only once all of them are written. A rejected operation
/// touches neither memory nor storage. A storage failure part-way through
/// leaves memory unchanged, but documents written before the failure stay
/// written: persistence is per document, not transactional.
pub struct Session<S: KeyValueStore> {
    storage: Storage<S>,
    catalog: CatalogService,
    orders: OrderService,
    cart: Cart,
    ids: Box<dyn IdGenerator>,
}

impl<S: KeyValueStore> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("prefix", &self.storage.prefix())
            .field("categories", &self.catalog.categories().len())
            .field("products", &self.catalog.products().len())
            .field("orders", &self.orders.orders().len())
            .field("cart_lines", &self.cart.len())
            .finish()
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Restores a session from storage.
    ///
    /// An empty category or product collection is replaced by the built-in
    /// seed. The restored state is written back immediately so that every
    /// key exists after the first launch.
    #[tracing::instrument(skip_all, fields(prefix = storage.prefix()))]
    pub fn load(storage: Storage<S>, ids: impl IdGenerator + 'static) -> Result<Self> {
        let mut categories = normalize::categories(&storage.load_categories(Value::Null)?);
        if categories.is_empty() {
            tracing::info!("no stored categories, using seed");
            categories = seed::categories();
        }
        let mut products = normalize::products(&storage.load_products(Value::Null)?);
        if products.is_empty() {
            tracing::info!("no stored products, using seed");
            products = seed::products();
        }
        let orders = normalize::orders(&storage.load_orders(json!([]))?);
        let cart = normalize::cart(&storage.load_cart()?);

        let session = Self {
            storage,
            catalog: CatalogService::with_catalog(categories, products),
            orders: OrderService::with_orders(StockService::new(), orders),
            cart,
            ids: Box::new(ids),
        };
        session.persist_all()?;

        tracing::debug!(
            categories = session.catalog.categories().len(),
            products = session.catalog.products().len(),
            orders = session.orders.orders().len(),
            "session loaded"
        );
        Ok(session)
    }

    /// Writes categories, products, the full order history and the cart.
    pub fn persist_all(&self) -> Result<()> {
        self.storage.save_categories(self.catalog.categories())?;
        self.storage.save_products(self.catalog.products())?;
        self.storage.save_orders(self.orders.orders())?;
        self.storage.save_cart(&self.cart)?;
        Ok(())
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderService {
        &self.orders
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Returns a fresh identifier from the session's generator.
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    // Mutations below apply to a copy, persist the copy, then commit it to
    // `self`. Memory only changes after every write succeeded.

    fn commit_catalog(&mut self, catalog: CatalogService) -> Result<()> {
        self.storage.save_categories(catalog.categories())?;
        self.storage.save_products(catalog.products())?;
        self.catalog = catalog;
        Ok(())
    }

    fn commit_cart(&mut self, cart: Cart) -> Result<()> {
        self.storage.save_cart(&cart)?;
        self.cart = cart;
        Ok(())
    }

    /// Adds `qty` units of a product to the cart.
    ///
    /// Missing products and products with no stock are refused.
    #[tracing::instrument(skip(self))]
    pub fn add_to_cart(&mut self, product_id: &ProductId, qty: u32) -> Result<()> {
        let product = self
            .catalog
            .get_product_by_id(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.clone()))?;
        if product.stock == 0 {
            return Err(CatalogError::InsufficientStock {
                product_id: product_id.clone(),
                requested: qty,
                available: 0,
            }
            .into());
        }

        let mut cart = self.cart.clone();
        cart.add(product, qty)?;
        self.commit_cart(cart)?;
        tracing::debug!(lines = self.cart.len(), "added to cart");
        Ok(())
    }

    /// Removes up to `qty` units; unknown products are ignored.
    pub fn remove_from_cart(&mut self, product_id: &ProductId, qty: u32) -> Result<()> {
        let mut cart = self.cart.clone();
        cart.remove(product_id, qty);
        self.commit_cart(cart)
    }

    pub fn delete_cart_line(&mut self, product_id: &ProductId) -> Result<()> {
        let mut cart = self.cart.clone();
        cart.delete_line(product_id)?;
        self.commit_cart(cart)
    }

    pub fn clear_cart(&mut self) -> Result<()> {
        self.commit_cart(Cart::new())
    }

    /// Places an order for the current cart under a freshly generated id.
    #[tracing::instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<Order> {
        let mut catalog = self.catalog.clone();
        let mut orders = self.orders.clone();
        let mut cart = self.cart.clone();

        let order = orders.place_order(&mut catalog, &mut cart, OrderId::new(self.next_id()))?;

        // Stock first: a failure after it undersells rather than oversells.
        self.storage.save_products(catalog.products())?;
        self.storage.save_orders(orders.orders())?;
        self.storage.save_cart(&cart)?;
        self.catalog = catalog;
        self.orders = orders;
        self.cart = cart;
        Ok(order)
    }

    /// Creates a category; a blank id is replaced by a generated one.
    pub fn create_category(&mut self, mut input: NewCategory) -> Result<Category> {
        if input.id.is_blank() {
            input.id = CategoryId::new(self.next_id());
        }
        let mut catalog = self.catalog.clone();
        let category = catalog.create_category(input)?;
        self.commit_catalog(catalog)?;
        Ok(category)
    }

    pub fn rename_category(&mut self, id: &CategoryId, name: &str) -> Result<Category> {
        let mut catalog = self.catalog.clone();
        let category = catalog.update_category(id, name)?;
        self.commit_catalog(catalog)?;
        Ok(category)
    }

    pub fn delete_category(&mut self, id: &CategoryId) -> Result<()> {
        let mut catalog = self.catalog.clone();
        catalog.delete_category(id)?;
        self.commit_catalog(catalog)
    }

    /// Creates a product; a blank id is replaced by a generated one.
    pub fn create_product(&mut self, mut input: NewProduct) -> Result<Product> {
        if input.id.is_blank() {
            input.id = ProductId::new(self.next_id());
        }
        let mut catalog = self.catalog.clone();
        let product = catalog.create_product(input)?;
        self.commit_catalog(catalog)?;
        Ok(product)
    }

    pub fn update_product(&mut self, update: ProductUpdate) -> Result<Product> {
        let mut catalog = self.catalog.clone();
        let product = catalog.update_product(update)?;
        self.commit_catalog(catalog)?;
        Ok(product)
    }

    /// Deletes a product. Cart lines pointing at it are kept; checkout will
    /// report them as short.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<()> {
        let mut catalog = self.catalog.clone();
        catalog.delete_product(id)?;
        self.commit_catalog(catalog)
    }

    pub fn set_stock(&mut self, id: &ProductId, stock: u32) -> Result<Product> {
        let mut catalog = self.catalog.clone();
        let product = catalog.set_stock(id, stock)?;
        self.commit_catalog(catalog)?;
        Ok(product)
    }

    /// Wipes every stored document under the prefix and starts over from
    /// the seed catalog with no orders and an empty cart.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) -> Result<()> {
        self.storage.reset_all()?;
        self.catalog = CatalogService::with_catalog(seed::categories(), seed::products());
        self.orders = OrderService::new(StockService::new());
        self.cart = Cart::new();
        self.persist_all()?;
        tracing::info!("storefront reset to seed data");
        Ok(())
    }
}

/// A [`Session`] shared between threads.
///
/// Each call holds the lock for its whole duration, so a checkout's stock
/// check and decrement cannot interleave with another writer.
#[derive(Debug)]
pub struct SharedSession<S: KeyValueStore> {
    inner: Arc<Mutex<Session<S>>>,
}

impl<S: KeyValueStore> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedSession<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Session<S>>> {
        self.inner.lock().map_err(|_| AppError::SessionPoisoned)
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session<S>) -> Result<R>) -> Result<R> {
        let mut session = self.lock()?;
        f(&mut session)
    }

    pub fn add_to_cart(&self, product_id: &ProductId, qty: u32) -> Result<()> {
        self.lock()?.add_to_cart(product_id, qty)
    }

    pub fn checkout(&self) -> Result<Order> {
        self.lock()?.checkout()
    }
}
