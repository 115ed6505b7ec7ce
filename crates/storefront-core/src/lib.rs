//! # storefront-core: Pure Domain Logic for the Storefront
//!
//! This crate holds every piece of the storefront that can be expressed as
//! a pure function: money, products, the cart, the catalog load state and
//! the grid view model. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering layer (CLI / mobile)               │   │
//! │  │      Loading text ──► Error text ──► Two-column product grid    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ watch::Receiver<LoadState>            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-catalog                           │   │
//! │  │       CatalogLoader ──► HttpCatalogSource ──► remote API        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ LoadState │  │   │
//! │  │   │ CartItem  │  │  $19.99   │  │   total   │  │   grid    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Catalog)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - LoadState and the product grid view model
//! - [`cart`] - Cart totals and removal
//! - [`error`] - Domain error types
//! - [`validation`] - Record validation at the fetch boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::{Cart, CartItem};
//!
//! let cart = Cart::new(vec![
//!     CartItem::new(1, "Shirt", Money::from_cents(1999)),
//!     CartItem::new(2, "Cap", Money::from_cents(501)),
//! ]);
//!
//! assert_eq!(cart.total()?.to_string(), "$25.00");
//! # Ok::<(), storefront_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartActions, CartLine, CartView};
pub use catalog::{Acknowledgement, GridRow, LoadState, ProductCard};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of products retained per load cycle.
pub const DEFAULT_CATALOG_CAP: usize = 20;

/// Number of words kept when a product title is shown on a card.
pub const CARD_TITLE_WORDS: usize = 5;

/// Number of cards per grid row.
pub const GRID_COLUMNS: usize = 2;

/// Text shown while a load cycle is in progress (including retries).
pub const LOADING_TEXT: &str = "Loading...";

/// The single user-facing message shown once the retry budget is spent.
pub const LOAD_ERROR_MESSAGE: &str = "Unable to load products. Please try again later.";
