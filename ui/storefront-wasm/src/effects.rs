//! Presentation effects.
//!
//! Everything in here is cosmetic and stateless across sessions: scroll
//! reveals, the navbar swap, ripple and hover treatments, the splash
//! loader, and the mobile menu. The scroll handler is debounced by a short
//! window; reveal animations fire once per element and never reverse.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
};

use crate::dom::{self, Elements};

/// Debounce window for scroll work.
const SCROLL_DEBOUNCE_MS: u32 = 10;
/// Scroll depth past which the navbar swaps its background.
const NAVBAR_THRESHOLD_PX: f64 = 50.0;
/// Ripple lifetime, matching the stylesheet's ripple keyframes.
const RIPPLE_MS: u32 = 600;

thread_local! {
    static SCROLL_DEBOUNCE: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

/// Wire every page-level effect. Call once after init.
pub fn setup(els: &Elements) {
    setup_mobile_menu(els);
    setup_smooth_anchors();
    setup_scroll_effects(els);
    setup_reveal_observer();
    setup_parallax();
    setup_menu_hover();
    setup_ripple();
    setup_focus_rings();
    show_splash_loader();
}

// ── Cart feedback ──

/// Restart the badge pulse animation.
pub fn pulse(badge: &Element) {
    let badge = badge.clone();
    dom::set_style(&badge, "animation", "none");
    Timeout::new(10, move || {
        dom::set_style(&badge, "animation", "pulse 0.6s ease");
    })
    .forget();
}

/// Briefly scale the cart button up on add-to-cart.
pub fn bump_cart_button(els: &Elements) {
    let Some(button) = els.cart_button.clone() else {
        return;
    };
    dom::set_style(&button, "transform", "scale(1.2)");
    Timeout::new(200, move || {
        dom::set_style(&button, "transform", "scale(1)");
    })
    .forget();
}

// ── Navigation ──

fn setup_mobile_menu(els: &Elements) {
    let Some(hamburger) = &els.hamburger else {
        return;
    };
    {
        let els = els.clone();
        let cb = Closure::wrap(Box::new(move |_: MouseEvent| {
            toggle_mobile_menu(&els);
        }) as Box<dyn FnMut(_)>);
        hamburger
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
    for link in dom::query_all(".nav-link") {
        let els = els.clone();
        let cb = Closure::wrap(Box::new(move |_: MouseEvent| {
            close_mobile_menu(&els);
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

fn toggle_mobile_menu(els: &Elements) {
    if let Some(h) = &els.hamburger {
        let _ = h.class_list().toggle("active");
    }
    if let Some(m) = &els.nav_menu {
        let _ = m.class_list().toggle("active");
    }
    let _ = dom::page_body().class_list().toggle("menu-open");
}

fn close_mobile_menu(els: &Elements) {
    if let Some(h) = &els.hamburger {
        dom::remove_class(h, "active");
    }
    if let Some(m) = &els.nav_menu {
        dom::remove_class(m, "active");
    }
    dom::remove_class(&dom::page_body().into(), "menu-open");
}

/// Smooth-scroll a named section into view.
pub fn scroll_to_section(id: &str) {
    if let Some(section) = dom::by_id(id) {
        scroll_into_view(&section);
    }
}

fn scroll_into_view(el: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

fn setup_smooth_anchors() {
    for anchor in dom::query_all("a[href^=\"#\"]") {
        let href = anchor.get_attribute("href").unwrap_or_default();
        let cb = Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(target) = dom::query(&href) {
                scroll_into_view(&target);
            }
        }) as Box<dyn FnMut(_)>);
        anchor
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

// ── Scroll effects ──

fn setup_scroll_effects(els: &Elements) {
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        // Trailing-edge debounce: each event resets the window.
        let els = els.clone();
        let timer = Timeout::new(SCROLL_DEBOUNCE_MS, move || {
            apply_navbar_state(&els);
        });
        SCROLL_DEBOUNCE.with(|slot| *slot.borrow_mut() = Some(timer));
    }) as Box<dyn FnMut(_)>);
    dom::page_window()
        .add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

fn apply_navbar_state(els: &Elements) {
    let Some(navbar) = &els.navbar else {
        return;
    };
    let depth = dom::page_window().scroll_y().unwrap_or(0.0);
    dom::toggle_class(navbar, "navbar--scrolled", depth > NAVBAR_THRESHOLD_PX);
}

/// One-shot fade/slide reveal for content cards entering the viewport.
fn setup_reveal_observer() {
    let cb = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    dom::add_class(&target, "animate-in");
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(0.1));
    init.set_root_margin("0px 0px -50px 0px");

    let Ok(observer) = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init)
    else {
        return;
    };
    for el in dom::query_all(".menu-item, .feature, .contact-item") {
        observer.observe(&el);
    }
    cb.forget();
}

/// Hero image and floating fruit drift at staggered speeds while scrolling.
/// Runs on the raw scroll event; the translation must track every frame.
fn setup_parallax() {
    let hero = dom::query(".hero-image");
    let fruits = dom::query_all(".fruit");
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let scrolled = dom::page_window().page_y_offset().unwrap_or(0.0);
        if let Some(hero) = &hero {
            dom::set_style(hero, "transform", &format!("translateY({}px)", scrolled * 0.5));
        }
        for (i, fruit) in fruits.iter().enumerate() {
            let speed = 0.3 + i as f64 * 0.1;
            dom::set_style(fruit, "transform", &format!("translateY({}px)", scrolled * speed));
        }
    }) as Box<dyn FnMut(_)>);
    dom::page_window()
        .add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

// ── Hover / click treatments ──

fn setup_menu_hover() {
    for item in dom::query_all(".menu-item") {
        {
            let item1 = item.clone();
            let cb = Closure::wrap(Box::new(move |_: MouseEvent| {
                dom::set_style(&item1, "transform", "translateY(-10px) scale(1.02)");
            }) as Box<dyn FnMut(_)>);
            item.add_event_listener_with_callback("mouseenter", cb.as_ref().unchecked_ref())
                .unwrap();
            cb.forget();
        }
        let item2 = item.clone();
        let cb = Closure::wrap(Box::new(move |_: MouseEvent| {
            dom::set_style(&item2, "transform", "translateY(0) scale(1)");
        }) as Box<dyn FnMut(_)>);
        item.add_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

const RIPPLE_TARGETS: &str = ".btn-primary, .btn-secondary, .btn-add-cart, .btn-login, .btn-cart";

fn setup_ripple() {
    let cb = Closure::wrap(Box::new(move |e: MouseEvent| {
        let Some(target) = e.target() else {
            return;
        };
        let Some(el) = target.dyn_ref::<Element>() else {
            return;
        };
        if el.matches(RIPPLE_TARGETS).unwrap_or(false) {
            create_ripple(el, &e);
        }
    }) as Box<dyn FnMut(_)>);
    gloo_utils::document()
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

fn create_ripple(button: &Element, e: &MouseEvent) {
    let rect = button.get_bounding_client_rect();
    let size = rect.width().max(rect.height());
    let x = f64::from(e.client_x()) - rect.left() - size / 2.0;
    let y = f64::from(e.client_y()) - rect.top() - size / 2.0;

    let ripple = dom::create_element("span");
    let _ = ripple.set_attribute(
        "style",
        &format!(
            "position: absolute; width: {size}px; height: {size}px; left: {x}px; top: {y}px; \
             background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
             animation: ripple 0.6s linear; pointer-events: none;"
        ),
    );

    dom::set_style(button, "position", "relative");
    dom::set_style(button, "overflow", "hidden");
    let _ = button.append_child(&ripple);

    Timeout::new(RIPPLE_MS, move || ripple.remove()).forget();
}

/// Highlight the wrapping form group while an input has focus.
fn setup_focus_rings() {
    let doc = gloo_utils::document();
    for (event, focused) in [("focusin", true), ("focusout", false)] {
        let cb = Closure::wrap(Box::new(move |e: web_sys::FocusEvent| {
            let Some(target) = e.target() else {
                return;
            };
            let Some(el) = target.dyn_ref::<Element>() else {
                return;
            };
            if el.matches("input, textarea").unwrap_or(false) {
                if let Some(parent) = el.parent_element() {
                    dom::toggle_class(&parent, "focused", focused);
                }
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

// ── Splash loader ──

/// Full-page loader shown until the window finishes loading, then removed
/// after a grace delay and fade.
fn show_splash_loader() {
    let loader = dom::create_element("div");
    let _ = loader.set_attribute("id", "page-loader");
    loader.set_inner_html(
        r#"
        <div class="loader-content">
            <div class="loader-logo">
                <i class="fas fa-leaf"></i>
                <span>FreshJuice</span>
            </div>
            <div class="loader-spinner"></div>
        </div>
        "#,
    );
    let _ = loader.set_attribute(
        "style",
        "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
         background: linear-gradient(135deg, #fff5f0 0%, #ffe8d6 100%); \
         display: flex; align-items: center; justify-content: center; \
         z-index: 10000; transition: opacity 0.5s ease;",
    );
    let _ = dom::page_body().append_child(&loader);

    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let loader = loader.clone();
        Timeout::new(1000, move || {
            dom::set_style(&loader, "opacity", "0");
            Timeout::new(500, move || loader.remove()).forget();
        })
        .forget();
    }) as Box<dyn FnMut(_)>);
    dom::page_window()
        .add_event_listener_with_callback("load", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}
