//! yew_fpx_checkout/src/bindings.rs
//!
//! Low-level wasm-bindgen bindings to the parts of Stripe.js v3 used by the
//! FPX checkout flow.
//!
//! Exposes the raw Stripe.js handles (`JsStripe`, `JsElements`, `JsFpxBankElement`)
//! and their async methods via `js_sys::Promise`.
//! Higher-level wrappers live in `processor.rs`.

use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Function, Promise};

#[wasm_bindgen]
extern "C" {
    //------------------------------------------------------------------------------
    // Core Types
    //------------------------------------------------------------------------------

    /// Raw Stripe.js client handle.
    #[wasm_bindgen(js_name = Stripe, js_namespace = window)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// Raw Elements factory handle.
    #[wasm_bindgen(js_name = Elements)]
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// Raw `fpxBank` element handle (the bank selection dropdown).
    #[wasm_bindgen(js_name = FpxBankElement)]
    #[derive(Debug, Clone)]
    pub type JsFpxBankElement;

    //------------------------------------------------------------------------------
    // Constructors
    //------------------------------------------------------------------------------

    /// Construct a new `JsStripe` from a publishable key and client options.
    ///
    /// ```js
    ///   const stripe = Stripe("pk_test_...", { betas: ["fpx_bank_beta_1"] });
    /// ```
    #[wasm_bindgen(catch, js_name = Stripe, js_namespace = window)]
    pub fn new_stripe(publishable_key: &str, options: JsValue) -> Result<JsStripe, JsValue>;

    //------------------------------------------------------------------------------
    // Instance Methods
    //------------------------------------------------------------------------------

    /// `stripe.elements({ locale })` → `JsElements`
    #[wasm_bindgen(method, catch, js_name = elements)]
    pub fn elements(this: &JsStripe, options: JsValue) -> Result<JsElements, JsValue>;

    /// `elements.create("fpxBank", options)` → `JsFpxBankElement`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create_element(
        this: &JsElements,
        element_type: &str,
        options: JsValue,
    ) -> Result<JsFpxBankElement, JsValue>;

    /// `fpxBank.mount(selector)` → `()`
    #[wasm_bindgen(method, catch, js_name = mount)]
    pub fn mount(this: &JsFpxBankElement, selector: &str) -> Result<(), JsValue>;

    /// `fpxBank.on(event, handler)` → `()`
    #[wasm_bindgen(method, catch, js_name = on)]
    pub fn on(this: &JsFpxBankElement, event: &str, handler: &Function) -> Result<(), JsValue>;

    /// `stripe.handleFpxPayment(clientSecret, fpxBank, { return_url })` → JS `Promise`
    ///
    /// Resolves with `{ error }` or `{ paymentIntent }`; on success Stripe.js
    /// usually navigates to the selected bank before the promise settles.
    #[wasm_bindgen(method, catch, js_name = handleFpxPayment)]
    pub fn handle_fpx_payment(
        this: &JsStripe,
        client_secret: &str,
        element: &JsFpxBankElement,
        data: JsValue,
    ) -> Result<Promise, JsValue>;

    /// `stripe.retrievePaymentIntent(clientSecret)` → JS `Promise`
    #[wasm_bindgen(method, catch, js_name = retrievePaymentIntent)]
    pub fn retrieve_payment_intent(this: &JsStripe, client_secret: &str) -> Result<Promise, JsValue>;
}
