//! Browser tests for the timer-backed scheduler.
//!
//! **Run with**: `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;
use yew_fpx_checkout::ui::{Scheduler, TimeoutScheduler};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn scheduled_task_runs_after_delay() {
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);

    TimeoutScheduler.schedule(50, Box::new(move || flag.set(true)));
    assert!(!fired.get());

    TimeoutFuture::new(120).await;
    assert!(fired.get());
}

#[wasm_bindgen_test]
async fn tasks_run_in_delay_order() {
    let order = Rc::new(std::cell::RefCell::new(Vec::new()));

    for delay in [60u32, 10, 30] {
        let order = Rc::clone(&order);
        TimeoutScheduler.schedule(delay, Box::new(move || order.borrow_mut().push(delay)));
    }

    TimeoutFuture::new(150).await;
    assert_eq!(*order.borrow(), [10, 30, 60]);
}
