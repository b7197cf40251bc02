//! Checkout dialog: step navigation, validation feedback, and the
//! simulated payment task.
//!
//! The pending payment timer is held in a thread-local slot; closing the
//! dialog takes and drops the handle, so a completion can never fire into a
//! reset view. A second submit while one is pending is refused outright.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use fj_storefront_core::cart::format_usd;
use fj_storefront_core::checkout::{
    CardDetails, CardField, CheckoutError, DeliveryDetails, DeliveryField, DeliveryWindow,
    OrderConfirmation, PaymentMethod, Step,
};

use crate::cart_view;
use crate::dom::{self, Elements};
use crate::forms;
use crate::modal::{self, Modal, ANIMATION_MS};
use crate::notify::{notify, Severity};
use crate::state;
use crate::storage;

/// Simulated payment-processing delay.
const PROCESSING_MS: u32 = 2000;

thread_local! {
    static PAYMENT_TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

/// Class applied to blank required fields.
const FIELD_ERROR_CLASS: &str = "field-error";

// ── Dialog lifecycle ──

/// Entry point from the cart modal. Guards against an empty cart, then
/// swaps the dialogs with the usual stagger.
pub fn proceed_to_checkout(els: &Elements) {
    let entry = state::with_mut(|s| {
        let empty = s.cart.is_empty();
        s.checkout.open(empty)
    });
    if entry.is_err() {
        notify("Your cart is empty!", Severity::Error);
        return;
    }

    modal::close(els, Modal::Cart);
    let els = els.clone();
    spawn_local(async move {
        TimeoutFuture::new(ANIMATION_MS).await;
        open_checkout(&els);
    });
}

fn open_checkout(els: &Elements) {
    modal::open(els, Modal::Checkout);
    show_step(els, Step::Delivery);
    cart_view::render_order_summary(els);
}

/// Close at any step: cancel pending work, reset the flow, clear the form.
pub fn close_checkout(els: &Elements) {
    cancel_pending_payment();
    state::with_mut(|s| s.checkout.reset());
    modal::close(els, Modal::Checkout);
    reset_form(els);
}

// ── Step transitions ──

pub fn next_step(els: &Elements) {
    match state::with(|s| s.checkout.step()) {
        Some(Step::Delivery) => submit_delivery(els),
        Some(Step::Payment) => process_payment(els),
        _ => {}
    }
}

pub fn prev_step(els: &Elements) {
    // Backing out of the payment step abandons a pending payment.
    cancel_pending_payment();
    state::with_mut(|s| s.checkout.back());
    if let Some(step) = state::with(|s| s.checkout.step()) {
        show_step(els, step);
    }
}

fn submit_delivery(els: &Elements) {
    let details = collect_delivery(els);
    match state::with_mut(|s| s.checkout.submit_delivery(&details)) {
        Ok(()) => {
            flag_delivery_fields(&[]);
            show_step(els, Step::Payment);
            cart_view::render_order_summary(els);
        }
        Err(CheckoutError::MissingDeliveryFields(blank)) => {
            flag_delivery_fields(&blank);
            notify("Please fill in all required fields", Severity::Error);
        }
        Err(_) => {}
    }
}

pub fn process_payment(els: &Elements) {
    if state::payment_in_flight() {
        return;
    }

    let method = selected_payment_method();
    let card = collect_card(els);
    match state::with_mut(|s| s.checkout.begin_payment(method, &card)) {
        Ok(_) => {}
        Err(CheckoutError::NoPaymentMethod) => {
            notify("Please select a payment method", Severity::Error);
            return;
        }
        Err(CheckoutError::MissingCardFields(blank)) => {
            flag_card_fields(els, &blank);
            notify("Please fill in all card details", Severity::Error);
            return;
        }
        Err(_) => return,
    }

    flag_card_fields(els, &[]);
    if let Some(button) = pay_button() {
        forms::show_loading_with(&button, "Processing...");
    }

    let els = els.clone();
    let timer = Timeout::new(PROCESSING_MS, move || complete_payment(&els));
    PAYMENT_TIMER.with(|slot| *slot.borrow_mut() = Some(timer));
}

fn complete_payment(els: &Elements) {
    PAYMENT_TIMER.with(|slot| slot.borrow_mut().take());

    // Confirmation data is derived before the cart is cleared.
    let totals = state::with(|s| s.cart.totals());
    let window = DeliveryWindow::parse(&dom::select_value(&els.delivery_time));
    let confirmation = OrderConfirmation::new(&state::order_number(), window, &totals);

    state::with_mut(|s| {
        s.checkout.complete_payment();
        s.cart.clear();
    });
    storage::clear();

    dom::set_text(&els.order_number, &confirmation.order_number);
    dom::set_text(&els.estimated_delivery, confirmation.estimated_delivery);
    dom::set_text(&els.final_total, &format_usd(confirmation.total));

    show_step(els, Step::Confirmation);
    cart_view::update_cart_count(els);
    cart_view::update_checkout_button(els);
    if let Some(button) = pay_button() {
        forms::hide_loading(&button);
    }
    notify("Order placed successfully!", Severity::Success);
}

fn cancel_pending_payment() {
    let pending = PAYMENT_TIMER.with(|slot| slot.borrow_mut().take());
    if pending.is_some() {
        state::with_mut(|s| s.checkout.cancel_payment());
        if let Some(button) = pay_button() {
            forms::hide_loading(&button);
        }
    }
}

/// Confirmation-step stub.
pub fn track_order(els: &Elements) {
    notify("Order tracking feature coming soon!", Severity::Info);
    close_checkout(els);
}

// ── Step display ──

fn show_step(els: &Elements, step: Step) {
    let current = step.index();
    for (i, panel) in els.step_panels.iter().enumerate() {
        let visible = i as u8 + 1 == current;
        dom::set_style(panel, "display", if visible { "block" } else { "none" });
    }
    for (i, indicator) in els.step_indicators.iter().enumerate() {
        let index = i as u8 + 1;
        dom::toggle_class(indicator, "completed", index < current);
        dom::toggle_class(indicator, "active", index == current);
    }
}

// ── Field access ──

fn delivery_field_id(field: DeliveryField) -> &'static str {
    match field {
        DeliveryField::FirstName => "firstName",
        DeliveryField::LastName => "lastName",
        DeliveryField::Email => "checkoutEmail",
        DeliveryField::Phone => "phone",
        DeliveryField::Address => "address",
        DeliveryField::City => "city",
        DeliveryField::Zip => "zipCode",
        DeliveryField::DeliveryTime => "deliveryTime",
    }
}

fn field_value(id: &str) -> String {
    let Some(el) = dom::by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn collect_delivery(els: &Elements) -> DeliveryDetails {
    DeliveryDetails {
        first_name: field_value("firstName"),
        last_name: field_value("lastName"),
        email: field_value("checkoutEmail"),
        phone: field_value("phone"),
        address: field_value("address"),
        city: field_value("city"),
        zip: field_value("zipCode"),
        delivery_time: dom::select_value(&els.delivery_time),
    }
}

fn collect_card(els: &Elements) -> CardDetails {
    CardDetails {
        number: dom::input_value(&els.card_number),
        expiry: dom::input_value(&els.expiry_date),
        cvv: dom::input_value(&els.cvv),
        name_on_card: dom::input_value(&els.card_name),
    }
}

fn selected_payment_method() -> Option<PaymentMethod> {
    let checked = dom::query("input[name=\"paymentMethod\"]:checked")?;
    let input = checked.dyn_ref::<HtmlInputElement>()?;
    PaymentMethod::parse(&input.value())
}

fn pay_button() -> Option<Element> {
    dom::query("[data-action=\"process-payment\"]")
}

// ── Validation feedback ──

fn flag_delivery_fields(blank: &[DeliveryField]) {
    for field in DeliveryField::ALL {
        if let Some(el) = dom::by_id(delivery_field_id(field)) {
            dom::toggle_class(&el, FIELD_ERROR_CLASS, blank.contains(&field));
        }
    }
}

fn flag_card_fields(els: &Elements, blank: &[CardField]) {
    let fields = [
        (CardField::Number, &els.card_number),
        (CardField::Expiry, &els.expiry_date),
        (CardField::Cvv, &els.cvv),
        (CardField::NameOnCard, &els.card_name),
    ];
    for (field, input) in fields {
        dom::toggle_class(input, FIELD_ERROR_CLASS, blank.contains(&field));
    }
}

/// Clear every entered value and flag inside the dialog, back to defaults.
fn reset_form(els: &Elements) {
    for el in dom::query_all_within(&els.checkout_modal, "input, textarea, select") {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            let ty = input.type_();
            if ty != "radio" && ty != "checkbox" {
                input.set_value("");
            }
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value("");
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value("");
        }
        dom::remove_class(&el, FIELD_ERROR_CLASS);
    }
    // Payment method defaults back to card, with its detail fields shown.
    els.card_payment.set_checked(true);
    dom::set_style(&els.card_details, "display", "block");
}
