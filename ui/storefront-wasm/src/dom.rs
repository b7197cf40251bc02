//! DOM element bindings.
//!
//! All required element references are resolved once at startup; optional
//! decorative elements (navbar, hamburger) are looked up with `query`. The
//! set of ids and classes consumed here is the host-document contract.

use gloo_utils::{body, document, window};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement,
};

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    collect_elements(document().query_selector_all(selector).ok())
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    collect_elements(parent.query_selector_all(selector).ok())
}

fn collect_elements(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let mut v = Vec::new();
    if let Some(nl) = list {
        for i in 0..nl.length() {
            if let Some(node) = nl.item(i) {
                if let Ok(el) = node.dyn_into::<Element>() {
                    v.push(el);
                }
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn input_value(el: &HtmlInputElement) -> String {
    el.value()
}

pub fn select_value(el: &HtmlSelectElement) -> String {
    el.value()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn create_element(tag: &str) -> Element {
    document()
        .create_element(tag)
        .unwrap_or_else(|_| panic!("create_element({tag})"))
}

pub fn style(el: &Element) -> web_sys::CssStyleDeclaration {
    el.unchecked_ref::<HtmlElement>().style()
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    let _ = style(el).set_property(property, value);
}

pub fn page_body() -> HtmlElement {
    body()
}

pub fn page_window() -> web_sys::Window {
    window()
}

// ── Elements struct ──

/// All fixed DOM references used by the storefront page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Navigation chrome (optional, purely decorative)
    pub navbar: Option<Element>,
    pub hamburger: Option<Element>,
    pub nav_menu: Option<Element>,
    pub cart_badge: Option<Element>,
    pub cart_button: Option<Element>,

    // Modals
    pub login_modal: Element,
    pub signup_modal: Element,
    pub cart_modal: Element,
    pub checkout_modal: Element,

    // Cart modal
    pub cart_items: Element,
    pub subtotal: Element,
    pub delivery_fee: Element,
    pub tax: Element,
    pub total: Element,
    pub checkout_btn: HtmlButtonElement,

    // Checkout steps
    pub step_indicators: Vec<Element>,
    pub step_panels: Vec<Element>,

    // Payment step
    pub card_payment: HtmlInputElement,
    pub card_details: Element,
    pub card_number: HtmlInputElement,
    pub expiry_date: HtmlInputElement,
    pub cvv: HtmlInputElement,
    pub card_name: HtmlInputElement,
    pub delivery_time: HtmlSelectElement,

    // Order summary + confirmation
    pub order_items: Element,
    pub order_subtotal: Element,
    pub order_delivery_fee: Element,
    pub order_tax: Element,
    pub order_total: Element,
    pub order_number: Element,
    pub estimated_delivery: Element,
    pub final_total: Element,

    // Account / engagement forms (optional sections of the page)
    pub login_form: Option<HtmlFormElement>,
    pub signup_form: Option<HtmlFormElement>,
    pub contact_form: Option<HtmlFormElement>,
    pub newsletter_form: Option<HtmlFormElement>,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_select {
    ($id:expr) => {
        by_id_typed::<HtmlSelectElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing select #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

fn form(selector: &str) -> Option<HtmlFormElement> {
    query(selector).and_then(|e| e.dyn_into::<HtmlFormElement>().ok())
}

impl Elements {
    /// Resolve all DOM references. Call once after the document is parsed.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            navbar: query(".navbar"),
            hamburger: query(".hamburger"),
            nav_menu: query(".nav-menu"),
            cart_badge: query(".cart-count"),
            cart_button: query(".btn-cart"),

            login_modal: get_el!("loginModal"),
            signup_modal: get_el!("signupModal"),
            cart_modal: get_el!("cartModal"),
            checkout_modal: get_el!("checkoutModal"),

            cart_items: get_el!("cartItems"),
            subtotal: get_el!("subtotal"),
            delivery_fee: get_el!("deliveryFee"),
            tax: get_el!("tax"),
            total: get_el!("total"),
            checkout_btn: get_button!("checkoutBtn"),

            step_indicators: query_all(".step"),
            step_panels: vec![get_el!("step1"), get_el!("step2"), get_el!("step3")],

            card_payment: get_input!("cardPayment"),
            card_details: get_el!("cardDetails"),
            card_number: get_input!("cardNumber"),
            expiry_date: get_input!("expiryDate"),
            cvv: get_input!("cvv"),
            card_name: get_input!("cardName"),
            delivery_time: get_select!("deliveryTime"),

            order_items: get_el!("orderItems"),
            order_subtotal: get_el!("orderSubtotal"),
            order_delivery_fee: get_el!("orderDeliveryFee"),
            order_tax: get_el!("orderTax"),
            order_total: get_el!("orderTotal"),
            order_number: get_el!("orderNumber"),
            estimated_delivery: get_el!("estimatedDelivery"),
            final_total: get_el!("finalTotal"),

            login_form: form(".login-form"),
            signup_form: form(".signup-form"),
            contact_form: form(".contact-form"),
            newsletter_form: form(".newsletter"),
        })
    }
}
