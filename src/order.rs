//! The order sent to `POST /create-payment-intent`.

use serde::Serialize;

/// A single line of the order. The server prices items by id.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct OrderItem {
    pub id: String,
}

/// `{ items: [{ id }] }`, built once at load time and never mutated.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Order {
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: ids.into_iter().map(|id| OrderItem { id: id.into() }).collect(),
        }
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new(["photo"])
    }
}
