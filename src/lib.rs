//! FPX bank-redirect checkout for the browser, built on Yew and Stripe.js.

mod bindings;
mod interop;
mod components;

pub mod api;
pub mod checkout_component;
pub mod config;
pub mod controller;
pub mod error;
pub mod order;
pub mod price;
pub mod processor;
pub mod redirect;
pub mod ui;

pub use bindings::*;
pub use interop::*;
pub use components::*;
pub use checkout_component::{
    CheckoutPage, CheckoutPageProps, CheckoutView, FpxCheckout, FpxCheckoutProps, UiAction,
};
pub use config::{CheckoutSettings, SessionConfig};
pub use controller::{CheckoutController, FlowState};
pub use error::{CheckoutError, StripeError};

#[cfg(feature = "auto-start")]
use wasm_bindgen::prelude::*;

/// Element id of an optional JSON block overriding [`CheckoutSettings`].
pub const SETTINGS_ELEMENT_ID: &str = "checkout-settings";

/// Mounts [`FpxCheckout`] into `<body>` when the wasm module is instantiated.
#[cfg(feature = "auto-start")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let settings = page_settings();
    tracing::debug!(?settings, "starting checkout");
    yew::Renderer::<FpxCheckout>::with_props(FpxCheckoutProps {
        settings,
        order: order::Order::default(),
        button_label: "Pay".to_string(),
    })
    .render();
}

/// Reads `<script id="checkout-settings" type="application/json">`.
#[cfg(feature = "auto-start")]
fn page_settings() -> CheckoutSettings {
    let json = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(SETTINGS_ELEMENT_ID))
        .and_then(|el| el.text_content());
    settings_from_json(json.as_deref())
}

/// Settings from the page's JSON block; defaults when it is absent or invalid.
pub fn settings_from_json(json: Option<&str>) -> CheckoutSettings {
    let Some(json) = json else {
        return CheckoutSettings::default();
    };
    serde_json::from_str(json).unwrap_or_else(|err| {
        tracing::warn!("ignoring invalid #{}: {}", SETTINGS_ELEMENT_ID, err);
        CheckoutSettings::default()
    })
}
