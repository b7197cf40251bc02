//! FreshJuice storefront domain logic.
//!
//! Pure, host-testable state for the storefront page: the cart store, order
//! totals, the checkout step machine with its validation gates, and the
//! payment-input sanitizers. No browser types; the `storefront-wasm` crate
//! owns all DOM and timer concerns.

pub mod cart;
pub mod checkout;
pub mod payment;
