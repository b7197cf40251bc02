//! Cart rendering and mutation handlers.
//!
//! Every mutation goes through the core [`Cart`], is mirrored into
//! localStorage, and re-renders exactly the fragments it touched: the badge
//! in the navbar, the cart modal body, the summary rows, and the checkout
//! button. The order summary on the checkout's payment step renders through
//! the same totals path so the two views can never diverge.

use fj_storefront_core::cart::{format_usd, LineItem, QuantityChange};

use crate::dom::{self, Elements};
use crate::effects;
use crate::modal::{self, Modal};
use crate::notify::{notify, Severity};
use crate::state;
use crate::storage;

/// Add one unit and surface the feedback (toast, badge pulse, button bump).
pub fn add_to_cart(els: &Elements, name: &str, price: f64) {
    state::with_mut(|s| {
        s.cart.add_item(name, price);
        storage::persist(&s.cart);
    });

    update_cart_count(els);
    update_checkout_button(els);
    effects::bump_cart_button(els);
    notify(&format!("{name} added to cart!"), Severity::Success);
}

pub fn remove_item(els: &Elements, id: u64) {
    let removed = state::with_mut(|s| {
        let removed = s.cart.remove_item(id);
        if removed.is_some() {
            storage::persist(&s.cart);
        }
        removed
    });

    let Some(item) = removed else {
        return;
    };
    update_cart_count(els);
    update_checkout_button(els);
    render_cart_items(els);
    render_cart_summary(els);
    notify(&format!("{} removed from cart!", item.name), Severity::Info);
}

pub fn change_quantity(els: &Elements, id: u64, delta: i32) {
    let change = state::with_mut(|s| {
        let change = s.cart.change_quantity(id, delta);
        if change.is_some() {
            storage::persist(&s.cart);
        }
        change
    });

    let Some(change) = change else {
        return;
    };
    update_cart_count(els);
    update_checkout_button(els);
    render_cart_items(els);
    render_cart_summary(els);
    if let QuantityChange::Removed(item) = change {
        notify(&format!("{} removed from cart!", item.name), Severity::Info);
    }
}

pub fn open_cart(els: &Elements) {
    modal::open(els, Modal::Cart);
    render_cart_items(els);
    render_cart_summary(els);
    update_checkout_button(els);
}

// ── Rendering ──

/// Badge in the navbar, with a pulse on every change.
pub fn update_cart_count(els: &Elements) {
    if let Some(badge) = &els.cart_badge {
        dom::set_text(badge, &state::cart_count().to_string());
        effects::pulse(badge);
    }
}

pub fn update_checkout_button(els: &Elements) {
    let empty = state::cart_is_empty();
    els.checkout_btn.set_disabled(empty);
    els.checkout_btn.set_text_content(Some(if empty {
        "Cart is Empty"
    } else {
        "Proceed to Checkout"
    }));
}

pub fn render_cart_items(els: &Elements) {
    let items = state::with(|s| s.cart.items().to_vec());

    if items.is_empty() {
        dom::set_inner_html(
            &els.cart_items,
            r#"
            <div class="empty-cart">
                <i class="fas fa-shopping-cart"></i>
                <h3>Your cart is empty</h3>
                <p>Add some fresh juices to get started!</p>
                <button class="btn-primary" data-action="close-cart">Start Shopping</button>
            </div>
            "#,
        );
        return;
    }

    let html: String = items.iter().map(render_line).collect();
    dom::set_inner_html(&els.cart_items, &html);
}

fn render_line(item: &LineItem) -> String {
    format!(
        r#"
        <div class="cart-item">
            <div class="cart-item-image cart-item-image--{slug}"></div>
            <div class="cart-item-details">
                <div class="cart-item-name">{name}</div>
                <div class="cart-item-price">{price}</div>
            </div>
            <div class="cart-item-controls">
                <div class="quantity-control">
                    <button class="quantity-btn" data-action="qty-decrease" data-id="{id}">-</button>
                    <span class="quantity-display">{quantity}</span>
                    <button class="quantity-btn" data-action="qty-increase" data-id="{id}">+</button>
                </div>
                <button class="remove-btn" data-action="remove-item" data-id="{id}" title="Remove item">
                    <i class="fas fa-trash"></i>
                </button>
            </div>
        </div>
        "#,
        slug = name_slug(&item.name),
        name = item.name,
        price = format_usd(item.price),
        id = item.id,
        quantity = item.quantity,
    )
}

/// CSS modifier for the per-juice tile color, owned by the stylesheet.
fn name_slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

pub fn render_cart_summary(els: &Elements) {
    let totals = state::with(|s| s.cart.totals());
    dom::set_text(&els.subtotal, &format_usd(totals.subtotal));
    dom::set_text(&els.delivery_fee, &format_usd(totals.delivery_fee));
    dom::set_text(&els.tax, &format_usd(totals.tax));
    dom::set_text(&els.total, &format_usd(totals.total));
}

/// The checkout payment step's order summary, fed by the same totals path
/// as the cart summary.
pub fn render_order_summary(els: &Elements) {
    let (items, totals) = state::with(|s| (s.cart.items().to_vec(), s.cart.totals()));

    let html: String = items
        .iter()
        .map(|item| {
            format!(
                r#"
                <div class="order-item">
                    <span class="order-item-name">{} x{}</span>
                    <span class="order-item-price">{}</span>
                </div>
                "#,
                item.name,
                item.quantity,
                format_usd(item.line_total()),
            )
        })
        .collect();
    dom::set_inner_html(&els.order_items, &html);

    dom::set_text(&els.order_subtotal, &format_usd(totals.subtotal));
    dom::set_text(&els.order_delivery_fee, &format_usd(totals.delivery_fee));
    dom::set_text(&els.order_tax, &format_usd(totals.tax));
    dom::set_text(&els.order_total, &format_usd(totals.total));
}
