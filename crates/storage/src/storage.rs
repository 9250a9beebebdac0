//! Typed facade over a [`KeyValueStore`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{KeyValueStore, Result};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "shop";

/// Logical names of the persisted collections.
pub mod keys {
    pub const CATEGORIES: &str = "categories";
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const CART: &str = "cart";
}

/// Namespaced JSON persistence.
///
/// Every value lives under `"{prefix}:{name}"`. Reads never fail on bad
/// data: a missing or unparseable document yields the caller's fallback.
/// Only backend failures (I/O, poisoned locks) surface as errors.
#[derive(Debug, Clone)]
pub struct Storage<S: KeyValueStore> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> Storage<S> {
    /// Creates a storage facade using [`DEFAULT_PREFIX`].
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_PREFIX)
    }

    /// Creates a storage facade using a custom key prefix.
    pub fn with_prefix(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Returns the key prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }

    /// Serializes `value` as JSON and writes it under `name`.
    pub fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(&self.key(name), &raw)
    }

    /// Loads the document under `name` as untyped JSON.
    ///
    /// Returns `fallback` when the key is missing, empty, or malformed.
    pub fn load_json(&self, name: &str, fallback: Value) -> Result<Value> {
        let Some(raw) = self.store.get(&self.key(name))? else {
            return Ok(fallback);
        };
        if raw.trim().is_empty() {
            return Ok(fallback);
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(name, error = %e, "discarding malformed stored document");
                Ok(fallback)
            }
        }
    }

    /// Loads the document under `name` as `T`, falling back on any mismatch.
    pub fn load<T: DeserializeOwned>(&self, name: &str, fallback: T) -> Result<T> {
        let value = self.load_json(name, Value::Null)?;
        if value.is_null() {
            return Ok(fallback);
        }
        match serde_json::from_value(value) {
            Ok(typed) => Ok(typed),
            Err(e) => {
                tracing::warn!(name, error = %e, "stored document has unexpected shape");
                Ok(fallback)
            }
        }
    }

    /// Removes the document under `name`.
    pub fn remove(&self, name: &str) -> Result<()> {
        self.store.remove(&self.key(name))
    }

    /// Removes every document under this storage's prefix.
    pub fn reset_all(&self) -> Result<()> {
        let prefix = format!("{}:", self.prefix);
        for key in self.store.keys()? {
            if key.starts_with(&prefix) {
                self.store.remove(&key)?;
            }
        }
        Ok(())
    }

    fn load_array(&self, name: &str, fallback: Value) -> Result<Value> {
        let value = self.load_json(name, Value::Null)?;
        if value.is_array() {
            Ok(value)
        } else {
            Ok(fallback)
        }
    }

    /// Loads raw category records; non-array payloads yield `fallback`.
    pub fn load_categories(&self, fallback: Value) -> Result<Value> {
        self.load_array(keys::CATEGORIES, fallback)
    }

    /// Loads raw product records; non-array payloads yield `fallback`.
    pub fn load_products(&self, fallback: Value) -> Result<Value> {
        self.load_array(keys::PRODUCTS, fallback)
    }

    /// Loads raw order records; non-array payloads yield `fallback`.
    pub fn load_orders(&self, fallback: Value) -> Result<Value> {
        self.load_array(keys::ORDERS, fallback)
    }

    /// Loads the raw cart; anything but an object with an `items` array
    /// yields an empty cart.
    pub fn load_cart(&self) -> Result<Value> {
        let value = self.load_json(keys::CART, Value::Null)?;
        let valid = value
            .as_object()
            .and_then(|cart| cart.get("items"))
            .is_some_and(Value::is_array);
        if valid {
            Ok(value)
        } else {
            Ok(json!({ "items": [] }))
        }
    }

    pub fn save_categories<T: Serialize>(&self, categories: &[T]) -> Result<()> {
        self.save(keys::CATEGORIES, categories)
    }

    pub fn save_products<T: Serialize>(&self, products: &[T]) -> Result<()> {
        self.save(keys::PRODUCTS, products)
    }

    pub fn save_orders<T: Serialize>(&self, orders: &[T]) -> Result<()> {
        self.save(keys::ORDERS, orders)
    }

    pub fn save_cart<T: Serialize>(&self, cart: &T) -> Result<()> {
        self.save(keys::CART, cart)
    }
}
