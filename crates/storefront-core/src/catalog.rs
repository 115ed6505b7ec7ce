//! # Catalog View Model
//!
//! The tri-state `LoadState` a load cycle publishes, and the pure functions
//! that turn a ready catalog into the two-column product grid.
//!
//! ## What the Renderer Shows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LoadState::Loading          →  "Loading..."                            │
//! │                                  (also during retry delays)             │
//! │                                                                         │
//! │  LoadState::Error{message}   →  "Unable to load products. Please try    │
//! │                                   again later."                         │
//! │                                                                         │
//! │  LoadState::Ready(catalog)   →  ┌──────────────┐ ┌──────────────┐       │
//! │                                 │ [image]      │ │ [image]      │       │
//! │                                 │ Shirt        │ │ Classic Red  │       │
//! │                                 │ $19.99       │ │ Pullover ... │       │
//! │                                 │ [Add to Cart]│ │ $10.00       │       │
//! │                                 └──────────────┘ └──────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Catalog, Product};
use crate::{CARD_TITLE_WORDS, GRID_COLUMNS, LOADING_TEXT, LOAD_ERROR_MESSAGE};

// =============================================================================
// Load State
// =============================================================================

/// The state of one catalog load cycle.
///
/// Exactly one variant is active at a time, so "loading with an error" or
/// "error with data" cannot be represented.
///
/// ## Transitions
/// ```text
///             success
///  Loading ──────────────► Ready(catalog)
///     │  ▲
///     │  │ failure, budget > 0 (after the retry delay)
///     └──┘
///     │
///     │ failure, budget == 0
///     ▼
///  Error { message }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum LoadState {
    /// A request or a retry delay is in progress.
    #[default]
    Loading,

    /// The retry budget was spent without a successful response.
    Error { message: String },

    /// The catalog was received.
    Ready(Catalog),
}

impl LoadState {
    /// The terminal error state with the fixed user-facing message.
    pub fn load_failed() -> Self {
        LoadState::Error {
            message: LOAD_ERROR_MESSAGE.to_string(),
        }
    }

    /// Returns true while the cycle has not finished.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Returns true for `Ready` and `Error`.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Returns the catalog when ready.
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            LoadState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Returns the products when ready.
    pub fn products(&self) -> Option<&[Product]> {
        self.catalog().map(|c| c.products.as_slice())
    }

    /// Returns the error message when the cycle failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Error { .. } => "error",
            LoadState::Ready(_) => "ready",
        }
    }

    /// The status line a renderer shows instead of the grid, if any.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            LoadState::Loading => Some(LOADING_TEXT),
            LoadState::Error { message } => Some(message),
            LoadState::Ready(_) => None,
        }
    }
}

// =============================================================================
// Title Truncation
// =============================================================================

/// Shortens a title to its first `max_words` space-separated words.
///
/// When the title has more than `max_words` words, the kept words are
/// joined with single spaces and followed by `...`. Otherwise the title is
/// returned unchanged.
///
/// ## Example
/// ```rust
/// use storefront_core::catalog::truncate_title;
///
/// assert_eq!(truncate_title("Shirt", 5), "Shirt");
/// assert_eq!(
///     truncate_title("Mens Casual Premium Slim Fit T-Shirts", 5),
///     "Mens Casual Premium Slim Fit..."
/// );
/// ```
pub fn truncate_title(title: &str, max_words: usize) -> String {
    let words: Vec<&str> = title.split(' ').collect();
    if words.len() > max_words {
        format!("{}...", words[..max_words].join(" "))
    } else {
        title.to_string()
    }
}

// =============================================================================
// Product Card
// =============================================================================

/// What one grid cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCard {
    /// Product id, used as the list key and for "add to cart".
    pub id: i64,

    /// Title truncated to five words.
    pub title: String,

    /// Price formatted as `$19.99`.
    pub price_label: String,

    /// Image URL, possibly empty.
    pub image_url: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        ProductCard {
            id: product.id,
            title: truncate_title(&product.title, CARD_TITLE_WORDS),
            price_label: product.price.to_string(),
            image_url: product.image_url.clone(),
        }
    }
}

/// One row of the grid: one or two cards.
pub type GridRow = Vec<ProductCard>;

/// Lays products out in rows of two, keeping source order.
///
/// An odd product count leaves a single card in the last row.
pub fn product_grid(products: &[Product]) -> Vec<GridRow> {
    products
        .chunks(GRID_COLUMNS)
        .map(|row| row.iter().map(ProductCard::from).collect())
        .collect()
}

// =============================================================================
// Add To Cart
// =============================================================================

/// The local notice shown when "Add to Cart" is pressed.
///
/// Pressing the button only produces this notice; no cart is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Acknowledgement {
    pub title: String,
    pub body: String,
}

/// Builds the add-to-cart notice for a product title.
pub fn add_to_cart_ack(product_title: &str) -> Acknowledgement {
    Acknowledgement {
        title: "Product added to cart".to_string(),
        body: format!(
            "The product \"{}\" has been added to your cart.",
            product_title
        ),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;

    fn shirt() -> Product {
        Product::new(1, "Shirt", Money::from_decimal(19.99).unwrap(), "https://img/shirt.png")
    }

    #[test]
    fn test_single_shirt_renders_one_card() {
        let state = LoadState::Ready(Catalog::new(vec![shirt()], Utc::now()));
        let grid = product_grid(state.products().unwrap());

        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), 1);
        assert_eq!(grid[0][0].title, "Shirt");
        assert_eq!(grid[0][0].price_label, "$19.99");
        assert_eq!(state.status_text(), None);
    }

    #[test]
    fn test_grid_rows_of_two() {
        let products: Vec<Product> = (1..=5)
            .map(|i| Product::new(i, format!("P{}", i), Money::from_cents(i * 100), ""))
            .collect();
        let grid = product_grid(&products);

        let shape: Vec<usize> = grid.iter().map(|row| row.len()).collect();
        assert_eq!(shape, vec![2, 2, 1]);

        let ids: Vec<i64> = grid.iter().flatten().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_grid() {
        assert!(product_grid(&[]).is_empty());
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("One two three four five", 5), "One two three four five");
        assert_eq!(truncate_title("One two three four five six", 5), "One two three four five...");
        assert_eq!(truncate_title("", 5), "");
    }

    #[test]
    fn test_card_uses_truncated_title() {
        let product = Product::new(
            9,
            "Fjallraven Foldsack No 1 Backpack Fits 15 Laptops",
            Money::from_cents(10995),
            "",
        );
        let card = ProductCard::from(&product);
        assert_eq!(card.title, "Fjallraven Foldsack No 1 Backpack...");
        assert_eq!(card.price_label, "$109.95");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(LoadState::Loading.status_text(), Some("Loading..."));
        assert_eq!(
            LoadState::load_failed().status_text(),
            Some("Unable to load products. Please try again later.")
        );
    }

    #[test]
    fn test_state_predicates() {
        assert!(LoadState::default().is_loading());
        assert!(LoadState::load_failed().is_terminal());
        assert_eq!(LoadState::load_failed().name(), "error");
        assert!(LoadState::Loading.products().is_none());
    }

    #[test]
    fn test_load_state_json_tag() {
        let json = serde_json::to_value(LoadState::load_failed()).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], LOAD_ERROR_MESSAGE);

        let json = serde_json::to_value(LoadState::Loading).unwrap();
        assert_eq!(json["status"], "loading");

        let ready = LoadState::Ready(Catalog::new(vec![shirt()], Utc::now()));
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["products"][0]["title"], "Shirt");
        assert_eq!(json["products"][0]["price"], 19.99);
        assert_eq!(json["products"][0]["imageUrl"], "https://img/shirt.png");
    }

    #[test]
    fn test_add_to_cart_ack() {
        let ack = add_to_cart_ack("Shirt");
        assert_eq!(ack.title, "Product added to cart");
        assert_eq!(ack.body, "The product \"Shirt\" has been added to your cart.");
    }
}
