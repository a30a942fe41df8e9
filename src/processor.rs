//! yew_fpx_checkout/src/processor.rs
//!
//! High-level Rust API over the Stripe.js FPX bank element.
//!
//! This module provides:
//! - `PaymentProcessor`, the capability the checkout controller consumes:
//!   mount the bank element, start the redirect payment, read the PaymentIntent back.
//! - `ProcessorConnector`, which builds a processor once the publishable key is known.
//! - `StripeFpx` / `StripeConnector`, the Stripe.js implementations.
//! - Option structs serialized into the Stripe.js calls (`StripeOptions`,
//!   `ElementsOptions`, `FpxBankElementOptions`, `HandleFpxPaymentData`).
//!
//! # Example Usage
//! ```rust,ignore
//! let stripe = StripeConnector.connect("pk_test_...", &CheckoutSettings::default())?;
//! stripe.mount_bank_element("#fpx-bank-element", Box::new(|sel| {
//!     tracing::debug!(complete = sel.complete, "bank selection changed");
//! }))?;
//! match stripe.confirm_fpx_payment(&secret, &href).await {
//!     Ok(PaymentAttempt::Processed) => { /* retrieve and show the intent */ }
//!     Ok(PaymentAttempt::Redirecting) => { /* browser is leaving for the bank */ }
//!     Err(err) => tracing::warn!("payment failed: {}", err),
//! }
//! ```

use std::cell::RefCell;

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::Reflect;

use crate::bindings::{new_stripe, JsElements, JsFpxBankElement, JsStripe};
use crate::config::CheckoutSettings;
use crate::error::{js_to_stripe_error, StripeError};
use crate::redirect::ClientSecret;

/// Payload of the bank element's `change` event.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct BankSelection {
    /// `true` once a bank has been picked.
    #[serde(default)]
    pub complete: bool,
}

/// What happened after a payment was initiated without a synchronous error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentAttempt {
    /// The intent was processed in place; its status can be retrieved now.
    Processed,
    /// The browser is being sent to the bank and will come back via `return_url`.
    Redirecting,
}

/// A PaymentIntent as returned by `stripe.retrievePaymentIntent`.
///
/// Kept as raw JSON; the flow only renders it.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentIntentStatus(serde_json::Value);

impl PaymentIntentStatus {
    pub fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(|v| v.as_str())
    }

    /// e.g. `"succeeded"`, `"requires_payment_method"`, `"processing"`.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    /// Two-space indented JSON, as shown in the result panel.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

/// The payment processor capability used by the checkout controller.
#[async_trait(?Send)]
pub trait PaymentProcessor {
    /// Create the bank element, mount it at `selector` and forward its
    /// `change` events to `on_change`.
    fn mount_bank_element(
        &self,
        selector: &str,
        on_change: Box<dyn Fn(BankSelection)>,
    ) -> Result<(), StripeError>;

    /// Start the bank-redirect payment. `Err` is a synchronous failure the
    /// customer can correct and retry.
    async fn confirm_fpx_payment(
        &self,
        client_secret: &ClientSecret,
        return_url: &str,
    ) -> Result<PaymentAttempt, StripeError>;

    async fn retrieve_payment_intent(
        &self,
        client_secret: &ClientSecret,
    ) -> Result<PaymentIntentStatus, StripeError>;
}

/// Builds a [`PaymentProcessor`] from the publishable key fetched at startup.
pub trait ProcessorConnector {
    type Processor: PaymentProcessor;

    fn connect(
        &self,
        public_key: &str,
        settings: &CheckoutSettings,
    ) -> Result<Self::Processor, StripeError>;
}

/// Options for `Stripe(key, { betas })`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StripeOptions {
    pub betas: Vec<String>,
}

/// Options for `stripe.elements({ locale })`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ElementsOptions {
    pub locale: String,
}

/// Options for `elements.create("fpxBank", { style, accountHolderType })`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FpxBankElementOptions {
    pub style: serde_json::Value,
    #[serde(rename = "accountHolderType")]
    pub account_holder_type: String,
}

impl FpxBankElementOptions {
    pub fn from_settings(settings: &CheckoutSettings) -> Self {
        Self {
            style: default_bank_style(),
            account_holder_type: settings.account_holder_type.clone(),
        }
    }
}

/// Third argument of `stripe.handleFpxPayment`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HandleFpxPaymentData {
    pub return_url: String,
}

/// Style object matching the surrounding form inputs.
pub fn default_bank_style() -> serde_json::Value {
    serde_json::json!({
        "base": {
            "padding": "10px 12px",
            "color": "#32325d",
            "fontFamily": "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif",
            "fontSmoothing": "antialiased",
            "fontSize": "16px",
            "::placeholder": { "color": "#aab7c4" }
        },
        "invalid": { "color": "#fa755a" }
    })
}

/// Connects to Stripe.js (`window.Stripe` must already be loaded).
#[derive(Clone, Copy, Debug, Default)]
pub struct StripeConnector;

impl ProcessorConnector for StripeConnector {
    type Processor = StripeFpx;

    fn connect(
        &self,
        public_key: &str,
        settings: &CheckoutSettings,
    ) -> Result<StripeFpx, StripeError> {
        let stripe_opts = to_js(&StripeOptions {
            betas: settings.betas.clone(),
        })?;
        let stripe = new_stripe(public_key, stripe_opts).map_err(js_to_stripe_error)?;

        let elements_opts = to_js(&ElementsOptions {
            locale: settings.locale.clone(),
        })?;
        let elements = stripe.elements(elements_opts).map_err(js_to_stripe_error)?;

        Ok(StripeFpx {
            stripe,
            elements,
            element_options: FpxBankElementOptions::from_settings(settings),
            element: RefCell::new(None),
            on_change: RefCell::new(None),
        })
    }
}

/// Stripe.js-backed [`PaymentProcessor`] for FPX.
pub struct StripeFpx {
    stripe: JsStripe,
    elements: JsElements,
    element_options: FpxBankElementOptions,
    element: RefCell<Option<JsFpxBankElement>>,
    // Must outlive the element: Stripe.js calls it on every change event.
    on_change: RefCell<Option<Closure<dyn FnMut(JsValue)>>>,
}

#[async_trait(?Send)]
impl PaymentProcessor for StripeFpx {
    fn mount_bank_element(
        &self,
        selector: &str,
        on_change: Box<dyn Fn(BankSelection)>,
    ) -> Result<(), StripeError> {
        let opts = to_js(&self.element_options)?;
        let element = self
            .elements
            .create_element("fpxBank", opts)
            .map_err(js_to_stripe_error)?;
        element.mount(selector).map_err(js_to_stripe_error)?;

        let handler = Closure::wrap(Box::new(move |event: JsValue| {
            let selection = from_value::<BankSelection>(event).unwrap_or_default();
            on_change(selection);
        }) as Box<dyn FnMut(JsValue)>);
        element
            .on("change", handler.as_ref().unchecked_ref())
            .map_err(js_to_stripe_error)?;

        *self.element.borrow_mut() = Some(element);
        *self.on_change.borrow_mut() = Some(handler);
        Ok(())
    }

    async fn confirm_fpx_payment(
        &self,
        client_secret: &ClientSecret,
        return_url: &str,
    ) -> Result<PaymentAttempt, StripeError> {
        let element = self
            .element
            .borrow()
            .clone()
            .ok_or_else(|| StripeError::new("bank element is not mounted"))?;
        let data = to_js(&HandleFpxPaymentData {
            return_url: return_url.to_string(),
        })?;

        let promise = self
            .stripe
            .handle_fpx_payment(client_secret.as_str(), &element, data)
            .map_err(js_to_stripe_error)?;
        let result = JsFuture::from(promise).await.map_err(js_to_stripe_error)?;
        check_result_error(&result)?;

        let intent = payment_intent_json(&result);
        let status = intent.as_ref().and_then(|pi| pi.get("status")).and_then(|v| v.as_str());
        Ok(match status {
            Some("requires_action") => PaymentAttempt::Redirecting,
            _ => PaymentAttempt::Processed,
        })
    }

    async fn retrieve_payment_intent(
        &self,
        client_secret: &ClientSecret,
    ) -> Result<PaymentIntentStatus, StripeError> {
        let promise = self
            .stripe
            .retrieve_payment_intent(client_secret.as_str())
            .map_err(js_to_stripe_error)?;
        let result = JsFuture::from(promise).await.map_err(js_to_stripe_error)?;
        check_result_error(&result)?;

        payment_intent_json(&result)
            .map(PaymentIntentStatus::new)
            .ok_or_else(|| StripeError::new("response has no paymentIntent"))
    }
}

/// Stripe.js resolves (rather than rejects) with `{ error }` on failure.
fn check_result_error(result: &JsValue) -> Result<(), StripeError> {
    let error = Reflect::get(result, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
    if error.is_undefined() || error.is_null() {
        Ok(())
    } else {
        Err(js_to_stripe_error(error))
    }
}

fn payment_intent_json(result: &JsValue) -> Option<serde_json::Value> {
    let pi = Reflect::get(result, &JsValue::from_str("paymentIntent")).ok()?;
    if pi.is_undefined() || pi.is_null() {
        return None;
    }
    pi.into_serde().ok()
}

/// Plain-object conversion (nested maps become objects, not `Map`s).
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, StripeError> {
    JsValue::from_serde(value).map_err(|e| StripeError::new(e.to_string()))
}
