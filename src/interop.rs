//! interop.rs
//!
//! Custom Yew hook to load Stripe.js v3 at runtime (no inline JS).
//!
//! # Overview
//! This hook, `use_stripejs()`, injects a single
//! `<script id="stripejs-sdk" src="https://js.stripe.com/v3/" defer>`
//! into `<head>` on first use and reports [`StripeJsStatus::Loading`] until
//! the script's `load` event fires ([`StripeJsStatus::Ready`]) or its `error`
//! event fires ([`StripeJsStatus::Failed`], e.g. blocked by CSP or offline).
//!
//! # Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use yew_fpx_checkout::{use_stripejs, StripeJsStatus};
//!
//! #[function_component(App)]
//! fn app() -> Html {
//!     match use_stripejs() {
//!         StripeJsStatus::Ready => html! { <p>{"Stripe.js loaded"}</p> },
//!         StripeJsStatus::Loading => html! { <p>{"Loading Stripe.js..."}</p> },
//!         StripeJsStatus::Failed => html! { <p>{"Payments are unavailable"}</p> },
//!     }
//! }
//! ```

use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{Document, HtmlScriptElement};
use yew::functional::hook;
use yew::prelude::*;

use crate::error::js_message;

const SCRIPT_ID: &str = "stripejs-sdk";
const SCRIPT_SRC: &str = "https://js.stripe.com/v3/";

/// Where Stripe.js is in its loading lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripeJsStatus {
    Loading,
    Ready,
    Failed,
}

/// `true` once `window.Stripe` exists.
fn stripe_loaded() -> bool {
    web_sys::window()
        .and_then(|win| Reflect::has(&win, &JsValue::from_str("Stripe")).ok())
        .unwrap_or(false)
}

/// Custom hook: load Stripe.js v3 exactly once and track readiness.
#[hook]
pub fn use_stripejs() -> StripeJsStatus {
    let status = use_state(|| {
        if stripe_loaded() {
            StripeJsStatus::Ready
        } else {
            StripeJsStatus::Loading
        }
    });

    {
        let status = status.clone();
        use_effect_with((), move |_| {
            if *status == StripeJsStatus::Loading {
                let onload = {
                    let status = status.clone();
                    Closure::once(move || status.set(StripeJsStatus::Ready))
                };
                let onerror = {
                    let status = status.clone();
                    Closure::once(move || {
                        tracing::error!("Stripe.js failed to load from {}", SCRIPT_SRC);
                        status.set(StripeJsStatus::Failed);
                    })
                };
                let injected = web_sys::window()
                    .and_then(|win| win.document())
                    .ok_or_else(|| JsValue::from_str("no document"))
                    .and_then(|document| inject_script(&document, &onload, &onerror));
                if let Err(err) = injected {
                    tracing::error!("could not load Stripe.js: {}", js_message(&err));
                    status.set(StripeJsStatus::Failed);
                }
                // Leak so they live until the script settles.
                onload.forget();
                onerror.forget();
            }
            || ()
        });
    }

    *status
}

/// Append the Stripe.js `<script>` unless a previous render already did.
///
/// When the tag already exists, another hook instance owns its handlers; this
/// one subscribes with additional listeners instead.
fn inject_script(
    document: &Document,
    onload: &Closure<dyn FnMut()>,
    onerror: &Closure<dyn FnMut()>,
) -> Result<(), JsValue> {
    if let Some(existing) = document.get_element_by_id(SCRIPT_ID) {
        existing.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
        return existing.add_event_listener_with_callback("error", onerror.as_ref().unchecked_ref());
    }

    let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_id(SCRIPT_ID);
    script.set_src(SCRIPT_SRC);
    script.set_defer(true);
    script.set_onload(Some(onload.as_ref().unchecked_ref()));
    script.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    head.append_child(&script)?;
    Ok(())
}
