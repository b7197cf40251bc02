//! FreshJuice storefront WASM frontend.
//!
//! Pure Rust + WASM implementation of the storefront page's interactivity.
//! Modularised by concern: typed actions, cart rendering, the checkout
//! dialog, modals, notifications, presentation effects, and persistence.

pub mod actions;
pub mod cart_view;
pub mod checkout;
pub mod dom;
pub mod effects;
pub mod events;
pub mod forms;
pub mod modal;
pub mod notify;
pub mod state;
pub mod storage;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init()
}

/// Main initialisation sequence.
fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    // Rehydrate the cart and draw the order number for this page load
    let cart = storage::load();
    let order_number = fj_storefront_core::checkout::order_number(js_sys::Math::random());
    state::init(cart, order_number);

    // Initial render of everything cart-derived
    cart_view::update_cart_count(&els);
    cart_view::update_checkout_button(&els);

    // Bind all event listeners, then the cosmetic layer
    events::bind_events(&els);
    effects::setup(&els);

    gloo_console::log!("FreshJuice storefront ready");
    Ok(())
}
