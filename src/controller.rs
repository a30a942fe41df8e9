//! Checkout flow controller.
//!
//! Drives one checkout per page load:
//!
//! ```text
//! Initializing ──► AwaitingInput ──► Submitting ──► Redirected ··► (page reload)
//!      │                ▲                │
//!      │                └── sync error ──┤
//!      │                                 ▼
//!      └──── redirect return ───────► Completed
//! ```
//!
//! A `Redirected` flow whose page is still alive after `redirect_timeout_ms`
//! falls back to showing the PaymentIntent in place.
//!
//! Any failure to reach the backend or Stripe outside of a payment attempt
//! moves the flow to `Failed`, which leaves the submit button disabled.

use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::api::CheckoutApi;
use crate::config::CheckoutSettings;
use crate::error::CheckoutError;
use crate::order::Order;
use crate::price::format_price;
use crate::processor::{PaymentAttempt, PaymentProcessor, ProcessorConnector};
use crate::redirect::{client_secret_from_url, return_url, ClientSecret};
use crate::ui::{CheckoutUi, Scheduler};

/// Shown when the flow cannot continue; details go to the console.
pub const FATAL_MESSAGE: &str =
    "Sorry, we couldn't set up the payment. Please refresh the page to try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    Initializing,
    AwaitingInput,
    Submitting,
    /// The browser is on its way to the bank.
    Redirected,
    Completed,
    Failed,
}

pub struct CheckoutController<A, C, U, S>
where
    C: ProcessorConnector,
{
    settings: CheckoutSettings,
    order: Order,
    api: A,
    connector: C,
    ui: U,
    scheduler: S,
    state: Rc<Cell<FlowState>>,
    processor: OnceCell<C::Processor>,
    client_secret: OnceCell<ClientSecret>,
    /// Last `complete` flag reported by the bank element, in any state.
    bank_complete: Rc<Cell<bool>>,
    error_generation: Rc<Cell<u64>>,
}

impl<A, C, U, S> CheckoutController<A, C, U, S>
where
    A: CheckoutApi,
    C: ProcessorConnector,
    U: CheckoutUi,
    S: Scheduler,
{
    pub fn new(
        settings: CheckoutSettings,
        order: Order,
        api: A,
        connector: C,
        ui: U,
        scheduler: S,
    ) -> Self {
        Self {
            settings,
            order,
            api,
            connector,
            ui,
            scheduler,
            state: Rc::new(Cell::new(FlowState::Initializing)),
            processor: OnceCell::new(),
            client_secret: OnceCell::new(),
            bank_complete: Rc::new(Cell::new(false)),
            error_generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state.get()
    }

    fn transition(&self, next: FlowState) {
        debug!(from = ?self.state.get(), to = ?next, "checkout state");
        self.state.set(next);
    }

    /// Page-load entry point. `href` is the current page URL.
    pub async fn initialize(&self, href: &str) {
        if self.state() != FlowState::Initializing {
            warn!(state = ?self.state(), "checkout already initialized");
            return;
        }
        if let Err(err) = self.try_initialize(href).await {
            self.fail(err);
        }
    }

    async fn try_initialize(&self, href: &str) -> Result<(), CheckoutError> {
        self.ui.set_submit_disabled(true);

        let config = self.api.fetch_config().await?;
        self.ui.show_price(format_price(
            config.amount,
            &config.currency,
            &self.settings.locale,
        ));

        let processor = self.connector.connect(&config.public_key, &self.settings)?;
        if self.processor.set(processor).is_err() {
            return Err(CheckoutError::Js("payment processor connected twice".into()));
        }

        match client_secret_from_url(href) {
            Some(secret) => {
                info!(?secret, "returned from bank redirect");
                self.render_outcome(&secret).await
            }
            None => self.begin_payment_intent_creation().await,
        }
    }

    async fn begin_payment_intent_creation(&self) -> Result<(), CheckoutError> {
        let secret = self.api.create_payment_intent(&self.order).await?;
        debug!(?secret, "payment intent created");
        // A second intent for the same page view would be an orphan.
        if self.client_secret.set(secret).is_err() {
            return Err(CheckoutError::Js("payment intent created twice".into()));
        }
        self.transition(FlowState::AwaitingInput);
        self.mount_payment_input()
    }

    fn mount_payment_input(&self) -> Result<(), CheckoutError> {
        let state = Rc::clone(&self.state);
        let complete = Rc::clone(&self.bank_complete);
        let ui = self.ui.clone();
        self.processor()?.mount_bank_element(
            &self.settings.mount_selector,
            Box::new(move |selection| {
                complete.set(selection.complete);
                if state.get() == FlowState::AwaitingInput {
                    ui.set_submit_disabled(!selection.complete);
                }
            }),
        )?;
        Ok(())
    }

    /// Form submission. Ignored unless the flow is waiting for input.
    pub async fn submit(&self, href: &str) {
        if self.state() != FlowState::AwaitingInput {
            debug!(state = ?self.state(), "submit ignored");
            return;
        }
        let (Some(secret), Ok(processor)) = (self.client_secret.get(), self.processor()) else {
            warn!("submit before payment intent was ready");
            return;
        };

        self.transition(FlowState::Submitting);
        self.ui.set_submit_disabled(true);
        self.ui.set_loading(true);

        match processor.confirm_fpx_payment(secret, &return_url(href)).await {
            Err(err) => {
                warn!(code = ?err.code, "payment attempt rejected: {}", err.message);
                self.transition(FlowState::AwaitingInput);
                self.show_error(err.message);
                self.ui.set_loading(false);
                // The selection may have been cleared while submitting.
                self.ui.set_submit_disabled(!self.bank_complete.get());
            }
            Ok(PaymentAttempt::Redirecting) => {
                info!("redirecting to bank");
                self.transition(FlowState::Redirected);
                self.scheduler.delay(self.settings.redirect_timeout_ms).await;
                if self.state() == FlowState::Redirected {
                    warn!("page still open after redirect, showing payment intent");
                    if let Err(err) = self.render_outcome(secret).await {
                        self.fail(err);
                    }
                }
            }
            Ok(PaymentAttempt::Processed) => {
                if let Err(err) = self.render_outcome(secret).await {
                    self.fail(err);
                }
            }
        }
    }

    async fn render_outcome(&self, secret: &ClientSecret) -> Result<(), CheckoutError> {
        let intent = self.processor()?.retrieve_payment_intent(secret).await?;
        info!(id = ?intent.id(), status = ?intent.status(), "payment intent retrieved");

        self.ui.render_outcome(intent.to_pretty_json());
        let ui = self.ui.clone();
        self.scheduler.schedule(
            self.settings.result_expand_delay_ms,
            Box::new(move || ui.expand_result()),
        );
        self.ui.set_loading(false);
        self.ui.set_submit_disabled(true);
        self.transition(FlowState::Completed);
        Ok(())
    }

    /// Inline error, cleared after `error_display_ms` unless replaced first.
    fn show_error(&self, message: String) {
        let generation = self.error_generation.get() + 1;
        self.error_generation.set(generation);
        self.ui.show_error(Some(message));

        let current = Rc::clone(&self.error_generation);
        let ui = self.ui.clone();
        self.scheduler.schedule(
            self.settings.error_display_ms,
            Box::new(move || {
                if current.get() == generation {
                    ui.show_error(None);
                }
            }),
        );
    }

    fn fail(&self, err: CheckoutError) {
        error!("checkout failed: {}", err);
        self.transition(FlowState::Failed);
        self.ui.set_loading(false);
        self.ui.set_submit_disabled(true);
        self.ui.show_fatal(FATAL_MESSAGE.to_string());
    }

    fn processor(&self) -> Result<&C::Processor, CheckoutError> {
        self.processor.get().ok_or(CheckoutError::NotConnected)
    }
}
