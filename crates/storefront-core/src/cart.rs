//! # Cart
//!
//! The cart view's model: a list of line items with a computed total.
//!
//! The cart owns no lifecycle. It is handed a sequence of items and two
//! callbacks (remove, pay) by whoever owns the cart data, and it forwards
//! button presses to those callbacks.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart View Operations                                 │
//! │                                                                         │
//! │  User Action              CartView                 Owner Callback       │
//! │  ───────────              ────────                 ──────────────       │
//! │                                                                         │
//! │  Click Remove ──────────► press_remove(id) ──────► remove_item(id)     │
//! │                                                                         │
//! │  Click Pay ─────────────► press_pay() ───────────► pay()               │
//! │                                                                         │
//! │  View Cart ─────────────► lines() / total_label() (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartItem;

// =============================================================================
// Cart
// =============================================================================

/// An ordered list of cart items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a cart from externally supplied items.
    pub fn new(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    /// Returns the items in order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consumes the cart and returns its items.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Returns the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item prices. An empty cart totals `$0.00`.
    ///
    /// ## Returns
    /// - `Err(CoreError::TotalOverflow)` if the sum does not fit in i64 cents
    pub fn total(&self) -> CoreResult<Money> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.checked_add(item.price).ok_or(CoreError::TotalOverflow)
        })
    }

    /// Returns a new cart with every line of `id` removed.
    ///
    /// All other lines keep their relative order. Removing an absent id
    /// returns an unchanged copy.
    pub fn without(&self, id: i64) -> Cart {
        Cart {
            items: self.items.iter().filter(|i| i.id != id).cloned().collect(),
        }
    }

    /// Removes every line of `id` in place.
    ///
    /// ## Returns
    /// - `Ok(())` if at least one line was removed
    /// - `Err(CoreError::ItemNotInCart)` otherwise
    pub fn remove_item(&mut self, id: i64) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart(id))
        } else {
            Ok(())
        }
    }

    /// Display lines: title and `$price` per item.
    pub fn lines(&self) -> Vec<CartLine> {
        self.items.iter().map(CartLine::from).collect()
    }

    /// Formats the total as `Total: $25.00`.
    pub fn total_label(&self) -> CoreResult<String> {
        Ok(format!("Total: {}", self.total()?))
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Cart {
            items: iter.into_iter().collect(),
        }
    }
}

/// A rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub id: i64,
    pub title: String,
    pub price_label: String,
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        CartLine {
            id: item.id,
            title: item.title.clone(),
            price_label: item.price.to_string(),
        }
    }
}

// =============================================================================
// Cart Actions
// =============================================================================

/// The two callbacks the cart view is handed by the owner of the cart data.
pub trait CartActions {
    /// Called when the user presses "Remove" on a line.
    fn remove_item(&mut self, id: i64);

    /// Called when the user presses "Pay".
    fn pay(&mut self);
}

/// The cart view: borrowed items plus the owner's callbacks.
pub struct CartView<'a, A: CartActions> {
    cart: &'a Cart,
    actions: &'a mut A,
}

impl<'a, A: CartActions> CartView<'a, A> {
    /// Creates a view over `cart` that forwards presses to `actions`.
    pub fn new(cart: &'a Cart, actions: &'a mut A) -> Self {
        CartView { cart, actions }
    }

    /// Display lines for the list.
    pub fn lines(&self) -> Vec<CartLine> {
        self.cart.lines()
    }

    /// The total line under the list.
    pub fn total_label(&self) -> CoreResult<String> {
        self.cart.total_label()
    }

    /// Forwards a "Remove" press for `id`.
    pub fn press_remove(&mut self, id: i64) {
        self.actions.remove_item(id);
    }

    /// Forwards a "Pay" press.
    pub fn press_pay(&mut self) {
        self.actions.pay();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, cents: i64) -> CartItem {
        CartItem::new(id, format!("Item {}", id), Money::from_cents(cents))
    }

    #[test]
    fn test_empty_cart_total() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total().unwrap(), Money::zero());
        assert_eq!(cart.total_label().unwrap(), "Total: $0.00");
    }

    #[test]
    fn test_total_is_exact_sum() {
        let cart = Cart::new(vec![item(1, 1999), item(2, 1), item(3, 10995)]);
        assert_eq!(cart.total().unwrap().cents(), 1999 + 1 + 10995);
        assert_eq!(cart.total_label().unwrap(), "Total: $129.95");
    }

    #[test]
    fn test_total_from_decimal_prices() {
        let cart: Cart = [0.1, 0.2, 0.3]
            .iter()
            .enumerate()
            .map(|(i, p)| CartItem::new(i as i64, "x", Money::from_decimal(*p).unwrap()))
            .collect();
        assert_eq!(cart.total().unwrap().to_string(), "$0.60");
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let cart = Cart::new(vec![item(1, i64::MAX - 10), item(2, 11)]);
        assert!(matches!(cart.total(), Err(CoreError::TotalOverflow)));
        assert!(matches!(cart.total_label(), Err(CoreError::TotalOverflow)));

        // Removing the offending line brings the total back
        assert_eq!(cart.without(2).total().unwrap().cents(), i64::MAX - 10);
    }

    #[test]
    fn test_huge_json_prices_are_rejected() {
        let json = r#"[{"id":1,"title":"A","price":9e16},{"id":2,"title":"B","price":9e16}]"#;
        let err = serde_json::from_str::<Cart>(json).unwrap_err();
        assert!(err.to_string().contains("price must be between"));
    }

    #[test]
    fn test_without_removes_only_that_id() {
        let cart = Cart::new(vec![item(1, 100), item(2, 200), item(3, 300), item(2, 250)]);
        let after = cart.without(2);

        let ids: Vec<i64> = after.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(after.items()[0], cart.items()[0]);
        assert_eq!(after.items()[1], cart.items()[2]);

        // Absent id leaves the cart unchanged
        assert_eq!(cart.without(99), cart);
    }

    #[test]
    fn test_remove_item_in_place() {
        let mut cart = Cart::new(vec![item(1, 100), item(2, 200)]);

        cart.remove_item(1).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(matches!(cart.remove_item(1), Err(CoreError::ItemNotInCart(1))));
    }

    #[test]
    fn test_lines() {
        let cart = Cart::new(vec![CartItem::new(4, "Shirt", Money::from_cents(1999))]);
        let lines = cart.lines();
        assert_eq!(lines[0].title, "Shirt");
        assert_eq!(lines[0].price_label, "$19.99");
    }

    #[derive(Default)]
    struct RecordingActions {
        removed: Vec<i64>,
        paid: usize,
    }

    impl CartActions for RecordingActions {
        fn remove_item(&mut self, id: i64) {
            self.removed.push(id);
        }

        fn pay(&mut self) {
            self.paid += 1;
        }
    }

    #[test]
    fn test_view_forwards_presses() {
        let cart = Cart::new(vec![item(1, 100), item(2, 200)]);
        let mut actions = RecordingActions::default();

        {
            let mut view = CartView::new(&cart, &mut actions);
            assert_eq!(view.total_label().unwrap(), "Total: $3.00");
            view.press_remove(2);
            view.press_pay();
        }

        assert_eq!(actions.removed, vec![2]);
        assert_eq!(actions.paid, 1);
        // The view never mutates the cart itself
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_cart_json_is_plain_array() {
        let cart: Cart =
            serde_json::from_str(r#"[{"id":1,"title":"Shirt","price":19.99}]"#).unwrap();
        assert_eq!(cart.total().unwrap().cents(), 1999);
    }
}
