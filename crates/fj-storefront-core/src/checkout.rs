//! Checkout step machine and its validation gates.
//!
//! Three sequential steps: delivery details → payment → confirmation.
//! Forward transitions are gated on field presence only; backward
//! transitions are unconditional. The flow is never persisted and resets
//! whenever the checkout dialog closes or completes.

use thiserror::Error;

use crate::cart::OrderTotals;

/// One of the three sequential checkout phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Delivery,
    Payment,
    Confirmation,
}

impl Step {
    /// 1-based position, as shown by the step indicators.
    pub fn index(self) -> u8 {
        match self {
            Step::Delivery => 1,
            Step::Payment => 2,
            Step::Confirmation => 3,
        }
    }
}

/// Required delivery-info fields, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    Zip,
    DeliveryTime,
}

impl DeliveryField {
    pub const ALL: [DeliveryField; 8] = [
        DeliveryField::FirstName,
        DeliveryField::LastName,
        DeliveryField::Email,
        DeliveryField::Phone,
        DeliveryField::Address,
        DeliveryField::City,
        DeliveryField::Zip,
        DeliveryField::DeliveryTime,
    ];
}

/// Values entered on the delivery step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeliveryDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub delivery_time: String,
}

impl DeliveryDetails {
    /// Fields that are blank after trimming, in display order.
    pub fn blank_fields(&self) -> Vec<DeliveryField> {
        DeliveryField::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), CheckoutError> {
        let blank = self.blank_fields();
        if blank.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingDeliveryFields(blank))
        }
    }

    pub fn delivery_window(&self) -> DeliveryWindow {
        DeliveryWindow::parse(&self.delivery_time)
    }

    fn value(&self, field: DeliveryField) -> &str {
        match field {
            DeliveryField::FirstName => &self.first_name,
            DeliveryField::LastName => &self.last_name,
            DeliveryField::Email => &self.email,
            DeliveryField::Phone => &self.phone,
            DeliveryField::Address => &self.address,
            DeliveryField::City => &self.city,
            DeliveryField::Zip => &self.zip,
            DeliveryField::DeliveryTime => &self.delivery_time,
        }
    }
}

/// Requested time-of-day slot, driving the delivery estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeliveryWindow {
    Asap,
    Morning,
    Afternoon,
    #[default]
    Evening,
}

impl DeliveryWindow {
    pub fn parse(value: &str) -> Self {
        match value {
            "asap" => DeliveryWindow::Asap,
            "morning" => DeliveryWindow::Morning,
            "afternoon" => DeliveryWindow::Afternoon,
            _ => DeliveryWindow::Evening,
        }
    }

    /// Human-readable estimate shown on the confirmation step.
    pub fn estimate(self) -> &'static str {
        match self {
            DeliveryWindow::Asap => "30-45 minutes",
            _ => "1-2 hours",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "card" => Some(PaymentMethod::Card),
            "cash" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

/// Card fields required when paying by card, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardField {
    Number,
    Expiry,
    Cvv,
    NameOnCard,
}

impl CardField {
    pub const ALL: [CardField; 4] = [
        CardField::Number,
        CardField::Expiry,
        CardField::Cvv,
        CardField::NameOnCard,
    ];
}

/// Values entered on the payment step. Presence-checked only; there is no
/// Luhn or expiry-range validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

impl CardDetails {
    pub fn blank_fields(&self) -> Vec<CardField> {
        CardField::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    fn value(&self, field: CardField) -> &str {
        match field {
            CardField::Number => &self.number,
            CardField::Expiry => &self.expiry,
            CardField::Cvv => &self.cvv,
            CardField::NameOnCard => &self.name_on_card,
        }
    }
}

/// Gate for the payment → confirmation transition.
pub fn validate_payment(
    method: Option<PaymentMethod>,
    card: &CardDetails,
) -> Result<PaymentMethod, CheckoutError> {
    let method = method.ok_or(CheckoutError::NoPaymentMethod)?;
    if method == PaymentMethod::Card {
        let blank = card.blank_fields();
        if !blank.is_empty() {
            return Err(CheckoutError::MissingCardFields(blank));
        }
    }
    Ok(method)
}

/// User-input validation failures. All are non-fatal and surfaced as field
/// highlights plus a notification.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("missing required delivery fields")]
    MissingDeliveryFields(Vec<DeliveryField>),
    #[error("missing required card details")]
    MissingCardFields(Vec<CardField>),
    #[error("no payment method selected")]
    NoPaymentMethod,
}

/// The checkout dialog's state. Lives only while the dialog is open.
#[derive(Clone, Debug, Default)]
pub struct CheckoutFlow {
    step: Option<Step>,
    payment_in_flight: bool,
}

impl CheckoutFlow {
    pub fn step(&self) -> Option<Step> {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.step.is_some()
    }

    pub fn payment_in_flight(&self) -> bool {
        self.payment_in_flight
    }

    /// Entry guard: checkout cannot open over an empty cart.
    pub fn open(&mut self, cart_is_empty: bool) -> Result<(), CheckoutError> {
        if cart_is_empty {
            return Err(CheckoutError::EmptyCart);
        }
        self.step = Some(Step::Delivery);
        self.payment_in_flight = false;
        Ok(())
    }

    /// Delivery → payment, gated on all eight fields being non-blank.
    pub fn submit_delivery(&mut self, details: &DeliveryDetails) -> Result<(), CheckoutError> {
        details.validate()?;
        if self.step == Some(Step::Delivery) {
            self.step = Some(Step::Payment);
        }
        Ok(())
    }

    /// Start the simulated payment. Validates the method and card fields and
    /// raises the in-flight guard; a second submission while pending is
    /// refused by the caller checking [`CheckoutFlow::payment_in_flight`].
    pub fn begin_payment(
        &mut self,
        method: Option<PaymentMethod>,
        card: &CardDetails,
    ) -> Result<PaymentMethod, CheckoutError> {
        let method = validate_payment(method, card)?;
        self.payment_in_flight = true;
        Ok(method)
    }

    /// Payment → confirmation, once the simulated processing completes.
    pub fn complete_payment(&mut self) {
        self.payment_in_flight = false;
        if self.step == Some(Step::Payment) {
            self.step = Some(Step::Confirmation);
        }
    }

    /// Drop a pending payment without advancing (dialog closed mid-flight).
    pub fn cancel_payment(&mut self) {
        self.payment_in_flight = false;
    }

    /// Unconditional backward transition.
    pub fn back(&mut self) {
        self.step = match self.step {
            Some(Step::Payment) => Some(Step::Delivery),
            Some(Step::Confirmation) => Some(Step::Payment),
            other => other,
        };
    }

    /// Close the dialog, discarding step and pending payment.
    pub fn reset(&mut self) {
        self.step = None;
        self.payment_in_flight = false;
    }
}

/// Order number assigned once per page load, `FJ-2024-NNN`.
/// `seed` is a uniform draw from `[0, 1)`.
pub fn order_number(seed: f64) -> String {
    let n = ((seed.clamp(0.0, 1.0) * 1000.0) as u32).min(999);
    format!("FJ-2024-{n:03}")
}

/// Ephemeral confirmation data, derived and rendered, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderConfirmation {
    pub order_number: String,
    pub estimated_delivery: &'static str,
    pub total: f64,
}

impl OrderConfirmation {
    pub fn new(order_number: &str, window: DeliveryWindow, totals: &OrderTotals) -> Self {
        Self {
            order_number: order_number.to_string(),
            estimated_delivery: window.estimate(),
            total: totals.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;

    fn filled_details() -> DeliveryDetails {
        DeliveryDetails {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Analytical Way".into(),
            city: "London".into(),
            zip: "12345".into(),
            delivery_time: "asap".into(),
        }
    }

    #[test]
    fn empty_cart_refuses_checkout_entry() {
        let mut flow = CheckoutFlow::default();
        assert_eq!(flow.open(true), Err(CheckoutError::EmptyCart));
        assert!(!flow.is_open());
    }

    #[test]
    fn blank_phone_keeps_the_flow_on_delivery() {
        let mut flow = CheckoutFlow::default();
        flow.open(false).unwrap();

        let details = DeliveryDetails {
            phone: "   ".into(),
            ..filled_details()
        };
        assert_eq!(
            flow.submit_delivery(&details),
            Err(CheckoutError::MissingDeliveryFields(vec![DeliveryField::Phone]))
        );
        assert_eq!(flow.step(), Some(Step::Delivery));
    }

    #[test]
    fn filled_delivery_advances_to_payment() {
        let mut flow = CheckoutFlow::default();
        flow.open(false).unwrap();
        flow.submit_delivery(&filled_details()).unwrap();
        assert_eq!(flow.step(), Some(Step::Payment));
    }

    #[test]
    fn card_payment_flags_exactly_the_blank_fields() {
        let card = CardDetails {
            number: "4242 4242 4242 4242".into(),
            name_on_card: "Ada Lovelace".into(),
            ..CardDetails::default()
        };
        assert_eq!(
            validate_payment(Some(PaymentMethod::Card), &card),
            Err(CheckoutError::MissingCardFields(vec![
                CardField::Expiry,
                CardField::Cvv,
            ]))
        );
    }

    #[test]
    fn cash_payment_needs_no_card_fields() {
        assert_eq!(
            validate_payment(Some(PaymentMethod::Cash), &CardDetails::default()),
            Ok(PaymentMethod::Cash)
        );
    }

    #[test]
    fn missing_method_is_rejected() {
        assert_eq!(
            validate_payment(None, &CardDetails::default()),
            Err(CheckoutError::NoPaymentMethod)
        );
    }

    #[test]
    fn payment_completion_reaches_confirmation_and_clears_the_guard() {
        let mut flow = CheckoutFlow::default();
        flow.open(false).unwrap();
        flow.submit_delivery(&filled_details()).unwrap();

        flow.begin_payment(Some(PaymentMethod::Cash), &CardDetails::default())
            .unwrap();
        assert!(flow.payment_in_flight());
        flow.complete_payment();
        assert_eq!(flow.step(), Some(Step::Confirmation));
        assert!(!flow.payment_in_flight());
    }

    #[test]
    fn closing_mid_payment_cancels_without_advancing() {
        let mut flow = CheckoutFlow::default();
        flow.open(false).unwrap();
        flow.submit_delivery(&filled_details()).unwrap();
        flow.begin_payment(Some(PaymentMethod::Cash), &CardDetails::default())
            .unwrap();

        flow.reset();
        assert!(!flow.is_open());
        assert!(!flow.payment_in_flight());
    }

    #[test]
    fn back_is_unconditional() {
        let mut flow = CheckoutFlow::default();
        flow.open(false).unwrap();
        flow.submit_delivery(&filled_details()).unwrap();
        flow.back();
        assert_eq!(flow.step(), Some(Step::Delivery));
        flow.back();
        assert_eq!(flow.step(), Some(Step::Delivery));
    }

    #[test]
    fn delivery_window_drives_the_estimate() {
        assert_eq!(DeliveryWindow::parse("asap").estimate(), "30-45 minutes");
        assert_eq!(DeliveryWindow::parse("morning").estimate(), "1-2 hours");
        assert_eq!(DeliveryWindow::parse("evening").estimate(), "1-2 hours");
    }

    #[test]
    fn order_number_is_zero_padded() {
        assert_eq!(order_number(0.0), "FJ-2024-000");
        assert_eq!(order_number(0.007), "FJ-2024-007");
        assert_eq!(order_number(0.9999), "FJ-2024-999");
        assert_eq!(order_number(1.0), "FJ-2024-999");
    }

    #[test]
    fn confirmation_total_matches_the_cart_totals() {
        let mut cart = Cart::default();
        cart.add_item("Orange Delight", 4.50);
        cart.add_item("Orange Delight", 4.50);

        let confirmation = OrderConfirmation::new(
            "FJ-2024-042",
            DeliveryWindow::Asap,
            &cart.totals(),
        );
        assert_eq!(confirmation.estimated_delivery, "30-45 minutes");
        assert_eq!(crate::cart::format_usd(confirmation.total), "$12.71");
    }
}
