//! Error types for the checkout flow.

use std::fmt;

use serde::Deserialize;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::JsValue;

/// Representation of a Stripe.js error object.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StripeError {
    /// Human-readable message.
    pub message: String,
    /// Stripe's error type, e.g. `"invalid_request_error"`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Optional Stripe error code, e.g. `"payment_intent_authentication_failure"`.
    #[serde(default)]
    pub code: Option<String>,
}

impl StripeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            code: None,
        }
    }
}

impl fmt::Display for StripeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for StripeError {}

/// Everything that can stop the checkout flow.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("stripe: {0}")]
    Stripe(#[from] StripeError),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("payment processor used before it was connected")]
    NotConnected,
}

/// Convert any caught `JsValue` into a `StripeError` with best effort.
pub(crate) fn js_to_stripe_error(value: JsValue) -> StripeError {
    from_value::<StripeError>(value.clone()).unwrap_or_else(|_| StripeError::new(js_message(&value)))
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
