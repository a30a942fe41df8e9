//! Presentation seam between the checkout controller and the page.

use std::future::Future;
use std::pin::Pin;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;

/// What the controller needs from the page.
///
/// Implementations must be cheap to clone; the controller hands clones to
/// widget callbacks and delayed tasks.
pub trait CheckoutUi: Clone + 'static {
    fn set_submit_disabled(&self, disabled: bool);

    /// Spinner instead of button text. Loading disables the submit button;
    /// leaving it enables the button again.
    fn set_loading(&self, loading: bool);

    fn show_price(&self, price: String);

    /// Inline payment error. `None` clears the field.
    fn show_error(&self, message: Option<String>);

    /// Persistent banner for failures that end the flow.
    fn show_fatal(&self, message: String);

    /// Hide the payment form and reveal the result panel with `intent_json`.
    fn render_outcome(&self, intent_json: String);

    /// Adds the `expand` transition to the revealed result panel.
    fn expand_result(&self);
}

/// Deferred work (`setTimeout` in the browser).
pub trait Scheduler: Clone + 'static {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    /// Resolves after `delay_ms`.
    fn delay(&self, delay_ms: u32) -> Pin<Box<dyn Future<Output = ()>>>;
}

/// [`Scheduler`] backed by `gloo-timers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        // Fire-and-forget: the timeout is never cancelled.
        Timeout::new(delay_ms, task).forget();
    }

    fn delay(&self, delay_ms: u32) -> Pin<Box<dyn Future<Output = ()>>> {
        Box::pin(TimeoutFuture::new(delay_ms))
    }
}
