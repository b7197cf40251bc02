//! Global application state.
//!
//! One owned [`AppState`] in `RefCell`-wrapped `thread_local!` storage
//! (WASM is single-threaded). All mutation goes through the core update
//! functions via `with_mut`; rendering reads snapshots via `with`.

use std::cell::RefCell;

use fj_storefront_core::cart::Cart;
use fj_storefront_core::checkout::CheckoutFlow;

/// Central application state.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub cart: Cart,
    pub checkout: CheckoutFlow,
    /// Assigned once per page load; shown on the confirmation step.
    pub order_number: String,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

/// Install the startup state (rehydrated cart, fresh order number).
pub fn init(cart: Cart, order_number: String) {
    with_mut(|s| {
        s.cart = cart;
        s.order_number = order_number;
    });
}

// ── Convenience accessors ──

pub fn cart_count() -> u32 {
    with(|s| s.cart.count())
}

pub fn cart_is_empty() -> bool {
    with(|s| s.cart.is_empty())
}

pub fn order_number() -> String {
    with(|s| s.order_number.clone())
}

pub fn payment_in_flight() -> bool {
    with(|s| s.checkout.payment_in_flight())
}
