//! Browser tests for the rendered checkout markup.
//!
//! **Run with**: `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;
use web_sys::Element;
use yew::html::BaseComponent;
use yew_fpx_checkout::price::format_price;
use yew_fpx_checkout::{
    CheckoutPage, CheckoutPageProps, CheckoutView, ResultPanel, ResultPanelProps, SubmitButton,
    SubmitButtonProps,
};

wasm_bindgen_test_configure!(run_in_browser);

/// Renders `props` into a fresh `<div>` under `<body>` and waits for Yew to
/// flush.
async fn render<C>(props: C::Properties) -> Element
where
    C: BaseComponent,
{
    let document = gloo_utils::document();
    let root = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&root).unwrap();
    yew::Renderer::<C>::with_root_and_props(root.clone(), props).render();
    TimeoutFuture::new(10).await;
    root
}

fn classes(root: &Element, selector: &str) -> Vec<String> {
    let el = root
        .query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("{selector} not rendered"));
    el.get_attribute("class")
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn has_class(root: &Element, selector: &str, class: &str) -> bool {
    classes(root, selector).iter().any(|c| c == class)
}

#[wasm_bindgen_test]
async fn idle_button_shows_text_not_spinner() {
    let root = render::<SubmitButton>(SubmitButtonProps {
        label: "Pay".into(),
        amount: Some("RM10.99".into()),
        disabled: false,
        loading: false,
    })
    .await;

    assert!(has_class(&root, "#spinner", "hidden"));
    assert!(!has_class(&root, "#button-text", "hidden"));
    let amount = root.query_selector("#order-amount").unwrap().unwrap();
    assert_eq!(amount.text_content().as_deref(), Some("RM10.99"));
}

#[wasm_bindgen_test]
async fn loading_button_shows_spinner_not_text() {
    let root = render::<SubmitButton>(SubmitButtonProps {
        label: "Pay".into(),
        amount: None,
        disabled: true,
        loading: true,
    })
    .await;

    assert!(!has_class(&root, "#spinner", "hidden"));
    assert!(has_class(&root, "#button-text", "hidden"));
    let button = root.query_selector("#submit").unwrap().unwrap();
    assert!(button.has_attribute("disabled"));
}

#[wasm_bindgen_test]
async fn result_panel_is_hidden_until_an_intent_arrives() {
    let root = render::<ResultPanel>(ResultPanelProps {
        intent_json: None,
        expanded: false,
    })
    .await;
    assert!(has_class(&root, ".sr-result", "hidden"));

    let root = render::<ResultPanel>(ResultPanelProps {
        intent_json: Some("{\n  \"status\": \"succeeded\"\n}".into()),
        expanded: false,
    })
    .await;
    assert!(!has_class(&root, ".sr-result", "hidden"));
    assert!(!has_class(&root, ".sr-result", "expand"));

    let root = render::<ResultPanel>(ResultPanelProps {
        intent_json: Some("{}".into()),
        expanded: true,
    })
    .await;
    assert_eq!(classes(&root, ".sr-result"), ["sr-result", "expand"]);
}

#[wasm_bindgen_test]
async fn form_is_hidden_once_the_outcome_is_rendered() {
    let root = render::<CheckoutPage>(CheckoutPageProps {
        view: CheckoutView::default(),
        onsubmit: Default::default(),
        button_label: "Pay".into(),
    })
    .await;
    assert!(!has_class(&root, "#payment-form", "hidden"));
    assert!(has_class(&root, ".sr-result", "hidden"));
    assert!(root.query_selector("#fpx-bank-element").unwrap().is_some());

    let view = CheckoutView {
        outcome: Some("{}".into()),
        expanded: true,
        ..CheckoutView::default()
    };
    let root = render::<CheckoutPage>(CheckoutPageProps {
        view,
        onsubmit: Default::default(),
        button_label: "Pay".into(),
    })
    .await;
    assert!(has_class(&root, "#payment-form", "hidden"));
    assert!(has_class(&root, ".sr-result", "expand"));
}

#[wasm_bindgen_test]
async fn fatal_banner_is_rendered() {
    let view = CheckoutView {
        fatal: Some("Payments are unavailable right now.".into()),
        ..CheckoutView::default()
    };
    let root = render::<CheckoutPage>(CheckoutPageProps {
        view,
        onsubmit: Default::default(),
        button_label: "Pay".into(),
    })
    .await;

    let banner = root.query_selector(".sr-fatal").unwrap().unwrap();
    assert_eq!(
        banner.text_content().as_deref(),
        Some("Payments are unavailable right now.")
    );
}

#[wasm_bindgen_test]
fn ringgit_is_formatted_by_the_browser() {
    assert_eq!(format_price(1099, "myr", "MS"), "RM10.99");
}
