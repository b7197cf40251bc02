//! Typed UI actions.
//!
//! Interactive controls carry a `data-action` attribute (plus `data-name` /
//! `data-price` / `data-id` operands where needed). One delegated click
//! listener parses the attribute into an [`Action`] and dispatches it, so
//! dynamically rendered cart controls need no per-button wiring.

use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::cart_view;
use crate::checkout;
use crate::dom::Elements;
use crate::effects;
use crate::modal::{self, Modal};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddToCart { name: String, price: f64 },
    RemoveItem { id: u64 },
    IncreaseQuantity { id: u64 },
    DecreaseQuantity { id: u64 },
    OpenCart,
    CloseCart,
    ProceedToCheckout,
    OpenLogin,
    CloseLogin,
    OpenSignup,
    CloseSignup,
    CloseCheckout,
    NextStep,
    PrevStep,
    ProcessPayment,
    TrackOrder,
    ScrollToMenu,
    ScrollToAbout,
}

impl Action {
    /// Parse an action from its attribute values.
    pub fn parse(
        kind: &str,
        name: Option<&str>,
        price: Option<&str>,
        id: Option<&str>,
    ) -> Option<Action> {
        let item_id = || id?.parse::<u64>().ok();
        match kind {
            "add-to-cart" => Some(Action::AddToCart {
                name: name?.to_string(),
                price: price?.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)?,
            }),
            "remove-item" => Some(Action::RemoveItem { id: item_id()? }),
            "qty-increase" => Some(Action::IncreaseQuantity { id: item_id()? }),
            "qty-decrease" => Some(Action::DecreaseQuantity { id: item_id()? }),
            "open-cart" => Some(Action::OpenCart),
            "close-cart" => Some(Action::CloseCart),
            "proceed-to-checkout" => Some(Action::ProceedToCheckout),
            "open-login" => Some(Action::OpenLogin),
            "close-login" => Some(Action::CloseLogin),
            "open-signup" => Some(Action::OpenSignup),
            "close-signup" => Some(Action::CloseSignup),
            "close-checkout" => Some(Action::CloseCheckout),
            "next-step" => Some(Action::NextStep),
            "prev-step" => Some(Action::PrevStep),
            "process-payment" => Some(Action::ProcessPayment),
            "track-order" => Some(Action::TrackOrder),
            "scroll-to-menu" => Some(Action::ScrollToMenu),
            "scroll-to-about" => Some(Action::ScrollToAbout),
            _ => None,
        }
    }

    /// Parse the action carried by a `[data-action]` element.
    pub fn from_element(el: &Element) -> Option<Action> {
        let kind = el.get_attribute("data-action")?;
        Action::parse(
            &kind,
            el.get_attribute("data-name").as_deref(),
            el.get_attribute("data-price").as_deref(),
            el.get_attribute("data-id").as_deref(),
        )
    }
}

/// Route an action to its handler.
pub fn dispatch(els: &Elements, action: Action) {
    match action {
        Action::AddToCart { name, price } => cart_view::add_to_cart(els, &name, price),
        Action::RemoveItem { id } => cart_view::remove_item(els, id),
        Action::IncreaseQuantity { id } => cart_view::change_quantity(els, id, 1),
        Action::DecreaseQuantity { id } => cart_view::change_quantity(els, id, -1),
        Action::OpenCart => cart_view::open_cart(els),
        Action::CloseCart => modal::close(els, Modal::Cart),
        Action::ProceedToCheckout => checkout::proceed_to_checkout(els),
        Action::OpenLogin => modal::open(els, Modal::Login),
        Action::CloseLogin => modal::close(els, Modal::Login),
        Action::OpenSignup => modal::open_signup(els),
        Action::CloseSignup => modal::close(els, Modal::Signup),
        Action::CloseCheckout => checkout::close_checkout(els),
        Action::NextStep => checkout::next_step(els),
        Action::PrevStep => checkout::prev_step(els),
        Action::ProcessPayment => checkout::process_payment(els),
        Action::TrackOrder => checkout::track_order(els),
        Action::ScrollToMenu => effects::scroll_to_section("menu"),
        Action::ScrollToAbout => effects::scroll_to_section("about"),
    }
}

/// Resolve the `[data-action]` element for a click target, walking up
/// through icon children inside the button.
pub fn action_for_target(target: &web_sys::EventTarget) -> Option<Action> {
    let el = target.dyn_ref::<Element>()?;
    let carrier = el.closest("[data-action]").ok().flatten()?;
    Action::from_element(&carrier)
}

#[cfg(test)]
mod tests {
    use super::Action;

    #[test]
    fn parses_add_to_cart_with_operands() {
        let action = Action::parse("add-to-cart", Some("Orange Delight"), Some("4.50"), None);
        assert_eq!(
            action,
            Some(Action::AddToCart {
                name: "Orange Delight".into(),
                price: 4.50,
            })
        );
    }

    #[test]
    fn rejects_malformed_operands() {
        assert_eq!(Action::parse("add-to-cart", Some("X"), Some("free"), None), None);
        assert_eq!(Action::parse("add-to-cart", Some("X"), Some("-1"), None), None);
        assert_eq!(Action::parse("add-to-cart", None, Some("4.50"), None), None);
        assert_eq!(Action::parse("remove-item", None, None, Some("abc")), None);
        assert_eq!(Action::parse("qty-increase", None, None, None), None);
    }

    #[test]
    fn parses_quantity_controls() {
        assert_eq!(
            Action::parse("qty-decrease", None, None, Some("7")),
            Some(Action::DecreaseQuantity { id: 7 })
        );
    }

    #[test]
    fn unknown_kinds_are_ignored() {
        assert_eq!(Action::parse("self-destruct", None, None, None), None);
    }
}
