//! Event binding.
//!
//! One delegated click listener routes `[data-action]` controls through the
//! typed [`Action`](crate::actions::Action) dispatch and handles modal
//! backdrop clicks; everything stateful hangs off that single path. Input
//! sanitizers, the payment-method toggle, and keyboard handling are wired
//! directly to their elements.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent};

use fj_storefront_core::payment;

use crate::actions;
use crate::dom::{self, Elements};
use crate::forms;
use crate::modal::{self, Modal};

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    bind_click_dispatch(els);
    bind_card_sanitizers(els);
    bind_payment_method_toggle(els);
    bind_keyboard(els);
    forms::bind_forms(els);
}

fn bind_click_dispatch(els: &Elements) {
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |e: MouseEvent| {
        let Some(target) = e.target() else {
            return;
        };
        if let Some(action) = actions::action_for_target(&target) {
            actions::dispatch(&els, action);
            return;
        }
        if let Some(el) = target.dyn_ref::<Element>() {
            modal::handle_backdrop_click(&els, el);
        }
    }) as Box<dyn FnMut(_)>);
    gloo_utils::document()
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Reshape card inputs on every keystroke.
fn bind_card_sanitizers(els: &Elements) {
    on_input(&els.card_number, payment::format_card_number);
    on_input(&els.expiry_date, payment::format_expiry);
    on_input(&els.cvv, payment::sanitize_cvv);
}

fn on_input(input: &HtmlInputElement, transform: fn(&str) -> String) {
    let input2 = input.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        input2.set_value(&transform(&input2.value()));
    }) as Box<dyn FnMut(_)>);
    input
        .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Card details only make sense for card payments.
fn bind_payment_method_toggle(els: &Elements) {
    for radio in dom::query_all("input[name=\"paymentMethod\"]") {
        let els = els.clone();
        let radio2 = radio.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let by_card = radio2
                .dyn_ref::<HtmlInputElement>()
                .map(|r| r.value() == "card")
                .unwrap_or(false);
            dom::set_style(
                &els.card_details,
                "display",
                if by_card { "block" } else { "none" },
            );
        }) as Box<dyn FnMut(_)>);
        radio
            .add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

fn bind_keyboard(els: &Elements) {
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            modal::close_all(&els);
        } else if e.key() == "Tab" {
            trap_modal_focus(&els, &e);
        }
    }) as Box<dyn FnMut(_)>);
    gloo_utils::document()
        .add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

const FOCUSABLE: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

/// Keep Tab cycling inside the open dialog.
fn trap_modal_focus(els: &Elements, e: &KeyboardEvent) {
    if !dom::has_class(&dom::page_body().into(), "modal-open") {
        return;
    }
    let Some(open) = Modal::ALL.into_iter().find(|m| modal::is_open(els, *m)) else {
        return;
    };
    let focusable = dom::query_all_within(open.element(els), FOCUSABLE);
    let (Some(first), Some(last)) = (focusable.first(), focusable.last()) else {
        return;
    };

    let active = gloo_utils::document().active_element();
    let focus = |el: &Element| {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.focus();
        }
    };
    if e.shift_key() {
        if active.as_ref() == Some(first) {
            focus(last);
            e.prevent_default();
        }
    } else if active.as_ref() == Some(last) {
        focus(first);
        e.prevent_default();
    }
}
