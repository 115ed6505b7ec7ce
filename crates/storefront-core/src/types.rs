//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Catalog      │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  products       │   │  id (i64)       │       │
//! │  │  title          │   │  fetched_at     │   │  title          │       │
//! │  │  price (Money)  │   │                 │   │  price (Money)  │       │
//! │  │  image_url      │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable once received. A successful fetch replaces the
//! whole `Catalog` at once; nothing mutates a product in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product as shown on the storefront grid.
///
/// This is the one canonical shape. Source-specific record layouts
/// (a single `image` string, an `images` array) are adapted into it at the
/// fetch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Identifier assigned by the remote catalog. Unique within a catalog.
    pub id: i64,

    /// Full product title (cards show a truncated form).
    pub title: String,

    /// Price, never negative. Written as a decimal JSON number (`19.99`).
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// URL of the product image. Empty when the source has none.
    pub image_url: String,
}

impl Product {
    /// Creates a product.
    pub fn new(id: i64, title: impl Into<String>, price: Money, image_url: impl Into<String>) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            image_url: image_url.into(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The product set delivered by one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Catalog {
    /// Products in source order, at most the configured cap, unique ids.
    pub products: Vec<Product>,

    /// When the response was received.
    #[ts(as = "String")]
    pub fetched_at: DateTime<Utc>,
}

impl Catalog {
    /// Creates a catalog from already-normalized products.
    pub fn new(products: Vec<Product>, fetched_at: DateTime<Utc>) -> Self {
        Catalog {
            products,
            fetched_at,
        }
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart view.
///
/// Cart items are owned by whoever supplies them to the cart view; this
/// crate never creates them from catalog products.
///
/// Prices are read and written as decimal JSON numbers (`19.99`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: i64,
    pub title: String,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
}

impl CartItem {
    /// Creates a cart item.
    pub fn new(id: i64, title: impl Into<String>, price: Money) -> Self {
        CartItem {
            id,
            title: title.into(),
            price,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_find() {
        let catalog = Catalog::new(
            vec![
                Product::new(1, "Shirt", Money::from_cents(1999), "https://img/1.png"),
                Product::new(2, "Cap", Money::from_cents(500), ""),
            ],
            Utc::now(),
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(2).map(|p| p.title.as_str()), Some("Cap"));
        assert!(catalog.find(3).is_none());
    }

    #[test]
    fn test_cart_item_decimal_json() {
        let item: CartItem =
            serde_json::from_str(r#"{"id": 3, "title": "Mug", "price": 7.5}"#).unwrap();
        assert_eq!(item, CartItem::new(3, "Mug", Money::from_cents(750)));
    }

    #[test]
    fn test_product_price_json_matches_cart_item() {
        let product = Product::new(1, "Shirt", Money::from_cents(1999), "");
        let item = CartItem::new(1, "Shirt", Money::from_cents(1999));

        let product_json = serde_json::to_value(&product).unwrap();
        let item_json = serde_json::to_value(&item).unwrap();
        assert_eq!(product_json["price"], 19.99);
        assert_eq!(product_json["price"], item_json["price"]);

        let back: Product = serde_json::from_value(product_json).unwrap();
        assert_eq!(back, product);
    }
}
