//! A drop-in Yew FPX checkout page.
//!
//! This component loads Stripe.js, renders the payment form, and hands the
//! flow itself to a [`CheckoutController`]. The controller talks back to the
//! page through [`YewUi`], which turns every UI call into a [`UiAction`] on
//! the component's reducer.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::HttpCheckoutApi;
use crate::components::{ErrorField, ResultPanel, SubmitButton};
use crate::config::CheckoutSettings;
use crate::controller::{CheckoutController, FATAL_MESSAGE};
use crate::order::Order;
use crate::processor::StripeConnector;
use crate::ui::{CheckoutUi, TimeoutScheduler};
use crate::{use_stripejs, StripeJsStatus};

type Controller = CheckoutController<HttpCheckoutApi, StripeConnector, YewUi, TimeoutScheduler>;

/// Everything the page shows, as plain data.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutView {
    pub submit_disabled: bool,
    pub loading: bool,
    pub price: Option<String>,
    pub error: Option<String>,
    pub fatal: Option<String>,
    /// Pretty-printed PaymentIntent; once set the form is hidden.
    pub outcome: Option<String>,
    pub expanded: bool,
}

impl Default for CheckoutView {
    fn default() -> Self {
        Self {
            submit_disabled: true,
            loading: false,
            price: None,
            error: None,
            fatal: None,
            outcome: None,
            expanded: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiAction {
    SetSubmitDisabled(bool),
    SetLoading(bool),
    ShowPrice(String),
    ShowError(Option<String>),
    ShowFatal(String),
    RenderOutcome(String),
    ExpandResult,
}

impl Reducible for CheckoutView {
    type Action = UiAction;

    fn reduce(self: Rc<Self>, action: UiAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            UiAction::SetSubmitDisabled(disabled) => next.submit_disabled = disabled,
            UiAction::SetLoading(loading) => {
                next.loading = loading;
                next.submit_disabled = loading;
            }
            UiAction::ShowPrice(price) => next.price = Some(price),
            UiAction::ShowError(message) => next.error = message,
            UiAction::ShowFatal(message) => next.fatal = Some(message),
            UiAction::RenderOutcome(json) => next.outcome = Some(json),
            UiAction::ExpandResult => next.expanded = true,
        }
        next.into()
    }
}

/// [`CheckoutUi`] that dispatches into the component's reducer.
#[derive(Clone)]
pub struct YewUi(UseReducerDispatcher<CheckoutView>);

impl CheckoutUi for YewUi {
    fn set_submit_disabled(&self, disabled: bool) {
        self.0.dispatch(UiAction::SetSubmitDisabled(disabled));
    }

    fn set_loading(&self, loading: bool) {
        self.0.dispatch(UiAction::SetLoading(loading));
    }

    fn show_price(&self, price: String) {
        self.0.dispatch(UiAction::ShowPrice(price));
    }

    fn show_error(&self, message: Option<String>) {
        self.0.dispatch(UiAction::ShowError(message));
    }

    fn show_fatal(&self, message: String) {
        self.0.dispatch(UiAction::ShowFatal(message));
    }

    fn render_outcome(&self, intent_json: String) {
        self.0.dispatch(UiAction::RenderOutcome(intent_json));
    }

    fn expand_result(&self) {
        self.0.dispatch(UiAction::ExpandResult);
    }
}

/// Properties for the [`FpxCheckout`] component.
///
/// * `settings` – Endpoints, Stripe options and timings; defaults suit a
///   same-origin backend.
/// * `order` – Items sent to `/create-payment-intent`.
/// * `button_label` – Pay button text (default: `"Pay"`).
#[derive(Properties, PartialEq, Clone)]
pub struct FpxCheckoutProps {
    #[prop_or_default]
    pub settings: CheckoutSettings,
    #[prop_or_default]
    pub order: Order,
    #[prop_or_else(|| "Pay".to_string())]
    pub button_label: String,
}

/// What the page should show for a Stripe.js loading state, if anything.
///
/// Without Stripe.js no controller is ever built, so a failed load has to be
/// surfaced here.
pub fn stripe_status_action(status: StripeJsStatus) -> Option<UiAction> {
    match status {
        StripeJsStatus::Failed => Some(UiAction::ShowFatal(FATAL_MESSAGE.to_string())),
        StripeJsStatus::Loading | StripeJsStatus::Ready => None,
    }
}

/// Yew function component rendering the complete FPX checkout page.
///
/// 1. Loads `https://js.stripe.com/v3/` once per page.
/// 2. Builds a single controller and runs its initialization: config, price,
///    redirect-return check, PaymentIntent, bank element.
/// 3. Forwards form submission to the controller.
#[function_component(FpxCheckout)]
pub fn fpx_checkout(props: &FpxCheckoutProps) -> Html {
    let stripe = use_stripejs();
    let view = use_reducer(CheckoutView::default);
    let controller = use_mut_ref(|| None::<Rc<Controller>>);

    {
        let controller = controller.clone();
        let ui = YewUi(view.dispatcher());
        let settings = props.settings.clone();
        let order = props.order.clone();
        use_effect_with(stripe, move |status| {
            if let Some(action) = stripe_status_action(*status) {
                ui.0.dispatch(action);
            } else if *status == StripeJsStatus::Ready && controller.borrow().is_none() {
                let api = HttpCheckoutApi::new(&settings);
                let flow = Rc::new(CheckoutController::new(
                    settings,
                    order,
                    api,
                    StripeConnector,
                    ui,
                    TimeoutScheduler,
                ));
                *controller.borrow_mut() = Some(Rc::clone(&flow));
                spawn_local(async move {
                    flow.initialize(&current_href()).await;
                });
            }
            || ()
        });
    }

    let onsubmit = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let flow = controller.borrow().clone();
            match flow {
                Some(flow) => {
                    spawn_local(async move {
                        flow.submit(&current_href()).await;
                    });
                }
                None => {
                    tracing::debug!("submit before checkout was initialized");
                }
            }
        })
    };

    html! {
        <CheckoutPage
            view={(*view).clone()}
            {onsubmit}
            button_label={props.button_label.clone()}
        />
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct CheckoutPageProps {
    pub view: CheckoutView,
    #[prop_or_default]
    pub onsubmit: Callback<SubmitEvent>,
    #[prop_or_else(|| "Pay".to_string())]
    pub button_label: String,
}

/// Stateless markup for a [`CheckoutView`].
#[function_component(CheckoutPage)]
pub fn checkout_page(props: &CheckoutPageProps) -> Html {
    let view = &props.view;
    let form_hidden = view.outcome.is_some().then_some("hidden");

    html! {
        <div class="sr-root">
            <div class="sr-main">
                <form
                    id="payment-form"
                    class={classes!("sr-payment-form", form_hidden)}
                    onsubmit={props.onsubmit.clone()}
                >
                    <div class="sr-combo-inputs-row">
                        <div class="sr-input sr-element" id="fpx-bank-element"></div>
                    </div>
                    <ErrorField message={view.error.clone()} />
                    <SubmitButton
                        label={props.button_label.clone()}
                        amount={view.price.clone()}
                        disabled={view.submit_disabled}
                        loading={view.loading}
                    />
                </form>
                {
                    if let Some(msg) = &view.fatal {
                        html! { <div class="sr-field-error sr-fatal" role="alert">{ msg }</div> }
                    } else {
                        Html::default()
                    }
                }
                <ResultPanel intent_json={view.outcome.clone()} expanded={view.expanded} />
            </div>
        </div>
    }
}

fn current_href() -> String {
    web_sys::window()
        .and_then(|win| win.location().href().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(view: CheckoutView, actions: impl IntoIterator<Item = UiAction>) -> CheckoutView {
        let mut view = Rc::new(view);
        for action in actions {
            view = view.reduce(action);
        }
        (*view).clone()
    }

    #[test]
    fn failed_stripe_load_shows_fatal_message() {
        assert_eq!(
            stripe_status_action(StripeJsStatus::Failed),
            Some(UiAction::ShowFatal(FATAL_MESSAGE.to_string()))
        );
        assert_eq!(stripe_status_action(StripeJsStatus::Loading), None);
        assert_eq!(stripe_status_action(StripeJsStatus::Ready), None);

        let view = apply(
            CheckoutView::default(),
            stripe_status_action(StripeJsStatus::Failed),
        );
        assert_eq!(view.fatal.as_deref(), Some(FATAL_MESSAGE));
        assert!(view.submit_disabled);
    }

    #[test]
    fn starts_with_submit_disabled() {
        let view = CheckoutView::default();
        assert!(view.submit_disabled);
        assert!(!view.loading);
    }

    #[test]
    fn loading_toggles_button() {
        let view = apply(
            CheckoutView::default(),
            [UiAction::SetSubmitDisabled(false), UiAction::SetLoading(true)],
        );
        assert!(view.loading && view.submit_disabled);

        let view = apply(view, [UiAction::SetLoading(false)]);
        assert!(!view.loading && !view.submit_disabled);
    }

    #[test]
    fn outcome_and_expand() {
        let view = apply(
            CheckoutView::default(),
            [UiAction::RenderOutcome("{}".into()), UiAction::ExpandResult],
        );
        assert_eq!(view.outcome.as_deref(), Some("{}"));
        assert!(view.expanded);
    }

    #[test]
    fn error_is_set_and_cleared() {
        let view = apply(
            CheckoutView::default(),
            [UiAction::ShowError(Some("Your card was declined.".into()))],
        );
        assert_eq!(view.error.as_deref(), Some("Your card was declined."));
        let view = apply(view, [UiAction::ShowError(None)]);
        assert!(view.error.is_none());
    }
}
