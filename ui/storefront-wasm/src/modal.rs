//! Modal dialogs.
//!
//! Four dialogs share one lifecycle: display toggle on the backdrop, a
//! 300 ms slide/fade on the content, and a `modal-open` class on the body
//! while any dialog is up. Closing the checkout dialog routes through
//! `checkout::close_checkout` so pending work is cancelled and the step
//! machine resets.

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::checkout;
use crate::dom::{self, Elements};
use crate::forms;

/// Content transition length, shared by every dialog.
pub const ANIMATION_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modal {
    Login,
    Signup,
    Cart,
    Checkout,
}

impl Modal {
    pub const ALL: [Modal; 4] = [Modal::Login, Modal::Signup, Modal::Cart, Modal::Checkout];

    pub fn element(self, els: &Elements) -> &Element {
        match self {
            Modal::Login => &els.login_modal,
            Modal::Signup => &els.signup_modal,
            Modal::Cart => &els.cart_modal,
            Modal::Checkout => &els.checkout_modal,
        }
    }

    /// Match a backdrop element back to its dialog.
    pub fn from_element(els: &Elements, el: &Element) -> Option<Modal> {
        Modal::ALL.into_iter().find(|m| m.element(els) == el)
    }
}

pub fn is_open(els: &Elements, modal: Modal) -> bool {
    dom::style(modal.element(els))
        .get_property_value("display")
        .map(|d| d == "block")
        .unwrap_or(false)
}

/// Show a dialog and slide its content in.
pub fn open(els: &Elements, modal: Modal) {
    let el = modal.element(els);
    dom::set_style(el, "display", "block");
    dom::add_class(&dom::page_body().into(), "modal-open");
    animate_in(el);
}

/// Slide the content out, then hide the dialog and release the body class.
pub fn close(els: &Elements, modal: Modal) {
    if modal == Modal::Login || modal == Modal::Signup {
        forms::cancel_pending(modal);
    }
    let el = modal.element(els).clone();
    animate_out(&el);
    Timeout::new(ANIMATION_MS, move || {
        dom::set_style(&el, "display", "none");
        dom::remove_class(&dom::page_body().into(), "modal-open");
    })
    .forget();
}

pub fn close_all(els: &Elements) {
    close(els, Modal::Login);
    close(els, Modal::Signup);
    close(els, Modal::Cart);
    checkout::close_checkout(els);
}

/// Login → signup swap, staggered so the dialogs do not overlap.
pub fn open_signup(els: &Elements) {
    close(els, Modal::Login);
    let els = els.clone();
    spawn_local(async move {
        TimeoutFuture::new(ANIMATION_MS).await;
        open(&els, Modal::Signup);
    });
}

/// A click that landed on a backdrop closes that dialog.
pub fn handle_backdrop_click(els: &Elements, target: &Element) {
    if !dom::has_class(target, "modal") {
        return;
    }
    match Modal::from_element(els, target) {
        Some(Modal::Checkout) => checkout::close_checkout(els),
        Some(modal) => close(els, modal),
        None => {}
    }
}

fn content(modal_el: &Element) -> Option<Element> {
    modal_el.query_selector(".modal-content").ok().flatten()
}

fn animate_in(modal_el: &Element) {
    let Some(content) = content(modal_el) else {
        return;
    };
    dom::set_style(&content, "transform", "translateY(-50px)");
    dom::set_style(&content, "opacity", "0");
    Timeout::new(10, move || {
        dom::set_style(&content, "transition", "all 0.3s ease");
        dom::set_style(&content, "transform", "translateY(0)");
        dom::set_style(&content, "opacity", "1");
    })
    .forget();
}

fn animate_out(modal_el: &Element) {
    let Some(content) = content(modal_el) else {
        return;
    };
    dom::set_style(&content, "transition", "all 0.3s ease");
    dom::set_style(&content, "transform", "translateY(-50px)");
    dom::set_style(&content, "opacity", "0");
}
