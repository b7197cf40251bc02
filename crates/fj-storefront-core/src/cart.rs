//! Cart store: line items, aggregate count, and order totals.
//!
//! Names are unique across items; `count` always equals the sum of all
//! quantities. Ids come from a monotonic per-cart counter and survive a
//! persistence round-trip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat delivery fee applied to every order, in dollars.
pub const DELIVERY_FEE: f64 = 2.99;

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: f64 = 0.08;

/// A named product entry in the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    /// Price × quantity for this line.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Monetary breakdown shown in the cart summary and the order summary.
/// Derived on demand; both views compute it through this one path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderTotals {
    pub fn from_subtotal(subtotal: f64) -> Self {
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            delivery_fee: DELIVERY_FEE,
            tax,
            total: subtotal + DELIVERY_FEE + tax,
        }
    }
}

/// Render a dollar amount to two decimal places.
pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Outcome of a quantity change.
#[derive(Clone, Debug, PartialEq)]
pub enum QuantityChange {
    Updated { id: u64, quantity: u32 },
    /// The change crossed zero and the item was removed outright.
    Removed(LineItem),
}

/// Rejected persisted cart state. The caller resets to an empty cart.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RestoreError {
    #[error("duplicate item name: {0}")]
    DuplicateName(String),
    #[error("item {0} has zero quantity")]
    ZeroQuantity(u64),
    #[error("item {0} has an invalid price")]
    InvalidPrice(u64),
}

/// Owned cart state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    count: u32,
    next_id: u64,
}

impl Cart {
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rebuild a cart from persisted line items.
    ///
    /// Rejects state that violates the cart invariants (duplicate names,
    /// zero quantities, non-finite or negative prices). A stored count that
    /// disagrees with the items is recomputed rather than rejected.
    pub fn restore(items: Vec<LineItem>, stored_count: Option<u32>) -> Result<Self, RestoreError> {
        for (i, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(RestoreError::ZeroQuantity(item.id));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(RestoreError::InvalidPrice(item.id));
            }
            if items[..i].iter().any(|other| other.name == item.name) {
                return Err(RestoreError::DuplicateName(item.name.clone()));
            }
        }

        let computed: u32 = items.iter().map(|item| item.quantity).sum();
        let next_id = items.iter().map(|item| item.id + 1).max().unwrap_or(0);
        Ok(Self {
            items,
            count: stored_count.filter(|&c| c == computed).unwrap_or(computed),
            next_id,
        })
    }

    /// Add one unit of `name`. Merges into an existing line, or appends a
    /// new line with a fresh id. Returns the id of the affected line.
    pub fn add_item(&mut self, name: &str, price: f64) -> u64 {
        self.count += 1;
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity += 1;
            return item.id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(LineItem {
            id,
            name: name.to_string(),
            price,
            quantity: 1,
        });
        id
    }

    /// Delete the matching line outright, subtracting its full quantity from
    /// the count. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: u64) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let item = self.items.remove(index);
        self.count -= item.quantity;
        Some(item)
    }

    /// Add `delta` to the line's quantity. A result of zero or below removes
    /// the line entirely.
    pub fn change_quantity(&mut self, id: u64, delta: i32) -> Option<QuantityChange> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let new_quantity = i64::from(self.items[index].quantity) + i64::from(delta);
        if new_quantity <= 0 {
            return self.remove_item(id).map(QuantityChange::Removed);
        }
        let quantity = new_quantity as u32;
        self.items[index].quantity = quantity;
        self.count = (i64::from(self.count) + i64::from(delta)) as u32;
        Some(QuantityChange::Updated { id, quantity })
    }

    /// Empty the cart and zero the count. Ids keep advancing.
    pub fn clear(&mut self) {
        self.items.clear();
        self.count = 0;
    }

    pub fn totals(&self) -> OrderTotals {
        let subtotal = self.items.iter().map(LineItem::line_total).sum();
        OrderTotals::from_subtotal(subtotal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str, price: f64, quantity: u32) -> LineItem {
        LineItem {
            id,
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn count_tracks_sum_of_quantities() {
        let mut cart = Cart::default();
        let a = cart.add_item("Orange Delight", 4.50);
        cart.add_item("Lemon Zest", 3.75);
        cart.add_item("Orange Delight", 4.50);
        cart.change_quantity(a, 3);
        let b = cart.add_item("Mango Paradise", 5.25);
        cart.remove_item(b);
        cart.change_quantity(a, -2);

        let summed: u32 = cart.items().iter().map(|i| i.quantity).sum();
        assert_eq!(cart.count(), summed);
    }

    #[test]
    fn repeat_add_merges_instead_of_duplicating() {
        let mut cart = Cart::default();
        let first = cart.add_item("Orange Delight", 4.50);
        let second = cart.add_item("Orange Delight", 4.50);

        assert_eq!(first, second);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn quantity_crossing_zero_removes_the_line() {
        let mut cart = Cart::default();
        let id = cart.add_item("Lemon Zest", 3.75);
        cart.add_item("Lemon Zest", 3.75);

        let change = cart.change_quantity(id, -5).unwrap();
        assert!(matches!(change, QuantityChange::Removed(ref i) if i.id == id));
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn decrement_above_zero_keeps_the_line() {
        let mut cart = Cart::default();
        let id = cart.add_item("Lemon Zest", 3.75);
        cart.add_item("Lemon Zest", 3.75);

        let change = cart.change_quantity(id, -1).unwrap();
        assert_eq!(change, QuantityChange::Updated { id, quantity: 1 });
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut cart = Cart::default();
        cart.add_item("Orange Delight", 4.50);
        assert_eq!(cart.remove_item(99), None);
        assert_eq!(cart.change_quantity(99, 1), None);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn totals_match_the_fee_and_tax_formula() {
        let mut cart = Cart::default();
        cart.add_item("Orange Delight", 4.50);
        cart.add_item("Orange Delight", 4.50);

        let totals = cart.totals();
        assert_eq!(format_usd(totals.subtotal), "$9.00");
        assert_eq!(format_usd(totals.delivery_fee), "$2.99");
        assert_eq!(format_usd(totals.tax), "$0.72");
        assert_eq!(format_usd(totals.total), "$12.71");
        assert_eq!(
            format_usd(totals.total),
            format_usd(totals.subtotal + DELIVERY_FEE + totals.subtotal * TAX_RATE)
        );
    }

    #[test]
    fn snapshot_round_trip_preserves_items_and_order() {
        let mut cart = Cart::default();
        cart.add_item("Orange Delight", 4.50);
        cart.add_item("Lemon Zest", 3.75);
        cart.add_item("Lemon Zest", 3.75);

        let json = serde_json::to_string(cart.items()).unwrap();
        let items: Vec<LineItem> = serde_json::from_str(&json).unwrap();
        let restored = Cart::restore(items, Some(cart.count())).unwrap();

        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.count(), cart.count());
        // Fresh ids never collide with restored ones
        let new_id = restored.clone().add_item("Mango Paradise", 5.25);
        assert!(cart.items().iter().all(|i| i.id != new_id));
    }

    #[test]
    fn restore_recomputes_a_disagreeing_count() {
        let items = vec![item(0, "Orange Delight", 4.50, 2)];
        let cart = Cart::restore(items, Some(7)).unwrap();
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn restore_rejects_invalid_state() {
        let dup = vec![
            item(0, "Orange Delight", 4.50, 1),
            item(1, "Orange Delight", 4.50, 1),
        ];
        assert_eq!(
            Cart::restore(dup, None),
            Err(RestoreError::DuplicateName("Orange Delight".into()))
        );

        let zero = vec![item(3, "Lemon Zest", 3.75, 0)];
        assert_eq!(Cart::restore(zero, None), Err(RestoreError::ZeroQuantity(3)));

        let negative = vec![item(4, "Lemon Zest", -1.0, 1)];
        assert_eq!(Cart::restore(negative, None), Err(RestoreError::InvalidPrice(4)));
    }
}
