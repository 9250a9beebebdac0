//! Order service: turns a cart into a placed order.

use chrono::Utc;
use common::OrderId;

use crate::cart::Cart;
use crate::catalog::CatalogService;
use crate::stock::{Fulfillment, StockService};

use super::{Order, OrderError, OrderLine, UNKNOWN_PRODUCT_NAME};

/// Owns the order history, most recent first.
///
/// The catalog and cart are borrowed for the duration of a single
/// [`place_order`](Self::place_order) call; the exclusive borrows are what
/// keep the check-then-apply sequence from interleaving with other writers.
#[derive(Debug, Clone, Default)]
pub struct OrderService {
    stock: StockService,
    orders: Vec<Order>,
}

impl OrderService {
    /// Creates a service with an empty history.
    pub fn new(stock: StockService) -> Self {
        Self {
            stock,
            orders: Vec::new(),
        }
    }

    /// Creates a service with a restored history (most recent first).
    pub fn with_orders(stock: StockService, orders: Vec<Order>) -> Self {
        Self { stock, orders }
    }

    /// Returns the stock service used for checks.
    pub fn stock_service(&self) -> StockService {
        self.stock
    }

    /// Places an order for everything in `cart`.
    ///
    /// Nothing is mutated unless every check passes: on success stock is
    /// decremented, the order is prepended to the history and the cart is
    /// emptied.
    #[tracing::instrument(skip(self, catalog, cart), fields(lines = cart.len()))]
    pub fn place_order(
        &mut self,
        catalog: &mut CatalogService,
        cart: &mut Cart,
        order_id: OrderId,
    ) -> Result<Order, OrderError> {
        match self.try_place_order(catalog, cart, order_id) {
            Ok(order) => {
                metrics::counter!("orders_placed_total").increment(1);
                tracing::info!(total = %order.total(), "order placed");
                Ok(order)
            }
            Err(e) => {
                metrics::counter!("orders_rejected_total", "reason" => e.kind().to_string())
                    .increment(1);
                Err(e)
            }
        }
    }

    fn try_place_order(
        &mut self,
        catalog: &mut CatalogService,
        cart: &mut Cart,
        order_id: OrderId,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if order_id.is_blank() {
            return Err(OrderError::OrderIdRequired);
        }
        if self.get_order_by_id(&order_id).is_some() {
            return Err(OrderError::AlreadyExists(order_id));
        }

        if let Fulfillment::Insufficient { missing } = self.stock.can_fulfill(cart, catalog) {
            return Err(OrderError::InsufficientStock {
                shortfalls: missing,
            });
        }

        let lines = cart
            .items()
            .iter()
            .map(|item| {
                let name = catalog
                    .get_product_by_id(&item.product_id)
                    .map_or(UNKNOWN_PRODUCT_NAME, |p| p.name.as_str());
                OrderLine::new(item.product_id.clone(), name, item.unit_price, item.quantity)
            })
            .collect();
        let order = Order::new(order_id, Utc::now(), lines)?;

        self.stock.apply_cart_stock(cart, catalog)?;
        self.orders.insert(0, order.clone());
        cart.clear();
        Ok(order)
    }

    /// Returns up to `limit` most recent orders; `None` or zero returns all.
    pub fn get_last_orders(&self, limit: Option<usize>) -> Vec<Order> {
        match limit {
            Some(n) if n > 0 => self.orders.iter().take(n).cloned().collect(),
            _ => self.orders.clone(),
        }
    }

    pub fn get_order_by_id(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == id)
    }

    /// Read-only view of the full history, most recent first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Replaces the whole history.
    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }
}
