//! Cart persistence.
//!
//! Two localStorage keys: `cartItems` holds the line items as a JSON array,
//! `cartCount` the aggregate count as a plain numeric string. Both are
//! rewritten after every cart mutation. Malformed or invariant-violating
//! state is discarded wholesale at load time: the cart restarts empty and
//! the stale keys are cleared.

use fj_storefront_core::cart::{Cart, LineItem};
use gloo_console::warn;
use gloo_storage::{LocalStorage, Storage};

const ITEMS_KEY: &str = "cartItems";
const COUNT_KEY: &str = "cartCount";

/// Mirror the cart into localStorage. Write failures (quota, private mode)
/// are logged and otherwise ignored; the in-memory cart stays authoritative.
pub fn persist(cart: &Cart) {
    if cart.is_empty() {
        clear();
        return;
    }
    if let Err(e) = LocalStorage::set(ITEMS_KEY, cart.items()) {
        warn!(format!("cart persist failed: {e}"));
        return;
    }
    let _ = LocalStorage::raw().set_item(COUNT_KEY, &cart.count().to_string());
}

/// Erase both persisted entries.
pub fn clear() {
    LocalStorage::delete(ITEMS_KEY);
    LocalStorage::delete(COUNT_KEY);
}

/// Rehydrate the cart at page load, falling back to an empty cart.
pub fn load() -> Cart {
    let Ok(items) = LocalStorage::get::<Vec<LineItem>>(ITEMS_KEY) else {
        // Absent is the common case; a parse failure also lands here and
        // any leftover count key is stale either way.
        clear();
        return Cart::default();
    };

    let stored_count = LocalStorage::raw()
        .get_item(COUNT_KEY)
        .ok()
        .flatten()
        .and_then(|raw| raw.parse::<u32>().ok());

    match Cart::restore(items, stored_count) {
        Ok(cart) => cart,
        Err(e) => {
            warn!(format!("discarding persisted cart: {e}"));
            clear();
            Cart::default()
        }
    }
}
