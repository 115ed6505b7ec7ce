//! The owner side of the cart view: records button presses and applies them.

use storefront_core::{Cart, CartActions};
use tracing::{info, warn};

/// Button presses collected from a [`CartView`](storefront_core::CartView).
#[derive(Debug, Default)]
pub struct CartPresses {
    removals: Vec<i64>,
    paid: bool,
}

impl CartActions for CartPresses {
    fn remove_item(&mut self, id: i64) {
        self.removals.push(id);
    }

    fn pay(&mut self) {
        self.paid = true;
    }
}

impl CartPresses {
    /// Returns true if "Pay" was pressed.
    pub fn paid(&self) -> bool {
        self.paid
    }

    /// Applies the removals in press order.
    pub fn apply(&self, mut cart: Cart) -> Cart {
        for &id in &self.removals {
            match cart.remove_item(id) {
                Ok(()) => info!(item_id = id, "Removed item from cart"),
                Err(e) => warn!(item_id = id, "{}", e),
            }
        }
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartItem, CartView, Money};

    fn cart() -> Cart {
        Cart::new(vec![
            CartItem::new(1, "Shirt", Money::from_cents(1999)),
            CartItem::new(2, "Cap", Money::from_cents(501)),
            CartItem::new(1, "Shirt", Money::from_cents(1999)),
            CartItem::new(3, "Socks", Money::from_cents(300)),
        ])
    }

    #[test]
    fn test_presses_flow_through_view() {
        let cart = cart();
        let mut presses = CartPresses::default();
        {
            let mut view = CartView::new(&cart, &mut presses);
            view.press_remove(1);
            view.press_remove(42);
            view.press_pay();
        }

        assert!(presses.paid());
        let cart = presses.apply(cart);
        let ids: Vec<i64> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(cart.total_label().unwrap(), "Total: $8.01");
    }

    #[test]
    fn test_cart_file_format() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id": 1, "title": "Shirt", "price": 19.99},
                {"id": 2, "title": "Cap", "price": 5.01}]"#,
        )
        .unwrap();
        assert_eq!(cart.total().unwrap().to_string(), "$25.00");
    }
}
