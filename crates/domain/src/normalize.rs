//! Load boundary: coerce loosely shaped persisted JSON into typed entities.
//!
//! Stored records are treated as an untrusted external contract. Payloads
//! that are not arrays become empty collections; records that cannot be
//! coerced are skipped with a warning rather than failing the whole load.

use common::Money;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::cart::Cart;
use crate::catalog::{Category, Product};
use crate::order::Order;

pub fn categories(raw: &Value) -> Vec<Category> {
    records(raw, "category")
}

pub fn products(raw: &Value) -> Vec<Product> {
    records(raw, "product")
}

pub fn orders(raw: &Value) -> Vec<Order> {
    records(raw, "order")
}

/// Anything but an object with an `items` array yields an empty cart.
pub fn cart(raw: &Value) -> Cart {
    let Some(items) = raw.get("items").and_then(Value::as_array) else {
        return Cart::new();
    };
    Cart::from_items(items.iter().filter_map(|item| {
        serde_json::from_value(item.clone())
            .map_err(|e| tracing::warn!(error = %e, "skipping malformed cart line"))
            .ok()
    }))
}

fn records<T: DeserializeOwned>(raw: &Value, kind: &'static str) -> Vec<T> {
    let Some(items) = raw.as_array() else {
        if !raw.is_null() {
            tracing::warn!(kind, "expected an array of records");
        }
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            serde_json::from_value(item.clone())
                .map_err(|e| tracing::warn!(kind, index, error = %e, "skipping malformed record"))
                .ok()
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseMoney {
    Cents { cents: i64 },
    Major(f64),
}

/// Accepts `{"cents": n}` or a decimal amount in major units.
pub(crate) fn loose_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    match LooseMoney::deserialize(deserializer)? {
        LooseMoney::Cents { cents } => Ok(Money::from_cents(cents)),
        LooseMoney::Major(amount) => {
            Money::from_major(amount).ok_or_else(|| D::Error::custom("amount is not finite"))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseCount {
    Int(u64),
    Float(f64),
}

/// Accepts a non-negative integer, including integral floats such as `3.0`.
pub(crate) fn loose_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match LooseCount::deserialize(deserializer)? {
        LooseCount::Int(n) => u32::try_from(n).ok(),
        LooseCount::Float(f) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
            Some(f as u32)
        }
        LooseCount::Float(_) => None,
    };
    count.ok_or_else(|| D::Error::custom("expected a non-negative integer"))
}
