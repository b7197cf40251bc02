//! Simulated account and engagement form submissions.
//!
//! Login, signup, contact, and newsletter all fake their round-trip with a
//! fixed delay and a loading state on the submit button. The dialog-bound
//! submissions (login, signup) keep their timer handles so closing the
//! dialog mid-"request" cancels the pending completion; the in-page forms
//! have nothing to cancel and leak theirs.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

use crate::dom::{self, Elements};
use crate::modal::{self, Modal};
use crate::notify::{notify, Severity};

const SUBMIT_MS: u32 = 2000;
const NEWSLETTER_MS: u32 = 1500;

thread_local! {
    static LOGIN_TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
    static SIGNUP_TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

// ── Loading states ──

/// Disable a button and swap its label, remembering the original.
pub fn show_loading_with(button: &Element, label: &str) {
    if button.get_attribute("data-original-text").is_none() {
        let _ = button.set_attribute(
            "data-original-text",
            &button.text_content().unwrap_or_default(),
        );
    }
    button.set_text_content(Some(label));
    let _ = button.set_attribute("disabled", "");
    dom::set_style(button, "opacity", "0.7");
}

pub fn show_loading(button: &Element) {
    show_loading_with(button, "Loading...");
}

/// Restore a button to its pre-loading label and enabled state.
pub fn hide_loading(button: &Element) {
    if let Some(original) = button.get_attribute("data-original-text") {
        button.set_text_content(Some(&original));
        let _ = button.remove_attribute("data-original-text");
    }
    let _ = button.remove_attribute("disabled");
    dom::set_style(button, "opacity", "1");
}

// ── Binding ──

pub fn bind_forms(els: &Elements) {
    if let Some(form) = &els.login_form {
        on_submit(form, els, handle_login);
    }
    if let Some(form) = &els.signup_form {
        on_submit(form, els, handle_signup);
    }
    if let Some(form) = &els.contact_form {
        on_submit(form, els, handle_contact);
    }
    if let Some(form) = &els.newsletter_form {
        on_submit(form, els, handle_newsletter);
    }
}

fn on_submit(form: &HtmlFormElement, els: &Elements, handler: fn(&Elements, &HtmlFormElement)) {
    let els = els.clone();
    let form2 = form.clone();
    let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
        e.prevent_default();
        handler(&els, &form2);
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Drop the pending completion for a closing dialog, restoring its button.
pub fn cancel_pending(dialog: Modal) {
    let slot = match dialog {
        Modal::Login => &LOGIN_TIMER,
        Modal::Signup => &SIGNUP_TIMER,
        _ => return,
    };
    let pending = slot.with(|t| t.borrow_mut().take());
    if pending.is_some() {
        if let Some(button) = submit_button_for(dialog) {
            hide_loading(&button);
        }
    }
}

fn submit_button_for(dialog: Modal) -> Option<Element> {
    match dialog {
        Modal::Login => dom::query(".login-form .btn-login-submit"),
        Modal::Signup => dom::query(".signup-form .btn-signup-submit"),
        _ => None,
    }
}

fn submit_button(form: &HtmlFormElement, class: &str) -> Option<Element> {
    form.query_selector(class)
        .ok()
        .flatten()
        .or_else(|| form.query_selector("button[type=\"submit\"], button").ok().flatten())
}

// ── Handlers ──

fn handle_login(els: &Elements, form: &HtmlFormElement) {
    let Some(button) = submit_button(form, ".btn-login-submit") else {
        return;
    };
    show_loading(&button);

    let els = els.clone();
    let timer = Timeout::new(SUBMIT_MS, move || {
        LOGIN_TIMER.with(|t| t.borrow_mut().take());
        if let Some(button) = submit_button_for(Modal::Login) {
            hide_loading(&button);
        }
        notify("Login successful!", Severity::Success);
        modal::close(&els, Modal::Login);
    });
    LOGIN_TIMER.with(|t| *t.borrow_mut() = Some(timer));
}

fn handle_signup(els: &Elements, form: &HtmlFormElement) {
    let password = dom::by_id_typed::<HtmlInputElement>("signup-password")
        .map(|i| i.value())
        .unwrap_or_default();
    let confirm = dom::by_id_typed::<HtmlInputElement>("confirm-password")
        .map(|i| i.value())
        .unwrap_or_default();
    if password != confirm {
        notify("Passwords do not match!", Severity::Error);
        return;
    }

    let Some(button) = submit_button(form, ".btn-signup-submit") else {
        return;
    };
    show_loading(&button);

    let els = els.clone();
    let timer = Timeout::new(SUBMIT_MS, move || {
        SIGNUP_TIMER.with(|t| t.borrow_mut().take());
        if let Some(button) = submit_button_for(Modal::Signup) {
            hide_loading(&button);
        }
        notify("Account created successfully!", Severity::Success);
        modal::close(&els, Modal::Signup);
    });
    SIGNUP_TIMER.with(|t| *t.borrow_mut() = Some(timer));
}

fn handle_contact(_els: &Elements, form: &HtmlFormElement) {
    let Some(button) = submit_button(form, ".btn-primary") else {
        return;
    };
    show_loading(&button);

    let form = form.clone();
    Timeout::new(SUBMIT_MS, move || {
        if let Some(button) = submit_button(&form, ".btn-primary") {
            hide_loading(&button);
        }
        form.reset();
        notify("Message sent successfully!", Severity::Success);
    })
    .forget();
}

fn handle_newsletter(_els: &Elements, form: &HtmlFormElement) {
    let Some(button) = submit_button(form, "button") else {
        return;
    };
    show_loading(&button);

    let form = form.clone();
    Timeout::new(NEWSLETTER_MS, move || {
        if let Some(button) = submit_button(&form, "button") {
            hide_loading(&button);
        }
        form.reset();
        notify("Successfully subscribed to newsletter!", Severity::Success);
    })
    .forget();
}
