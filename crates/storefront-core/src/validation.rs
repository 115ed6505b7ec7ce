//! # Validation Module
//!
//! Checks applied to product records at the fetch boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON decode (storefront-catalog)                             │
//! │  ├── Body must be an array of product-shaped records                   │
//! │  └── Failure here = fetch failure → retry                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Record rules (THIS MODULE)                                   │
//! │  ├── parse_price: finite, non-negative, rounded to cents              │
//! │  ├── validate_title: non-empty                                         │
//! │  └── Failure here = record dropped, logged by the caller               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog rules (THIS MODULE)                                  │
//! │  ├── unique ids, first occurrence wins                                 │
//! │  └── at most `cap` products, source order kept                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted price, in cents. A cart of 1024 items at this price
/// still totals within i64.
pub const MAX_PRICE_CENTS: i64 = i64::MAX / 1024;

// =============================================================================
// Field Validators
// =============================================================================

/// Converts a decimal wire price into cents.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is allowed)
/// - Must not exceed [`MAX_PRICE_CENTS`]
/// - Rounded to the nearest cent, half away from zero
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_price;
///
/// assert_eq!(parse_price(19.99).unwrap().cents(), 1999);
/// assert!(parse_price(-5.0).is_err());
/// ```
pub fn parse_price(value: f64) -> ValidationResult<Money> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    let cents = (value * 100.0).round();
    if cents > MAX_PRICE_CENTS as f64 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS / 100,
        });
    }

    Ok(Money::from_cents(cents as i64))
}

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Rules
// =============================================================================

/// Outcome of applying the catalog rules to a decoded product list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    /// Products that made it into the catalog.
    pub kept: Vec<Product>,

    /// Ids that appeared more than once (later occurrences were dropped).
    pub duplicate_ids: Vec<i64>,

    /// Number of unique products dropped because of the cap.
    pub truncated: usize,
}

/// Enforces unique ids and the cap while keeping source order.
///
/// Duplicates are removed before the cap is applied, so a catalog with
/// repeated ids still fills up to `cap` distinct products.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::types::Product;
/// use storefront_core::validation::enforce_catalog_rules;
///
/// let products = vec![
///     Product::new(1, "A", Money::zero(), ""),
///     Product::new(1, "A again", Money::zero(), ""),
///     Product::new(2, "B", Money::zero(), ""),
/// ];
/// let filter = enforce_catalog_rules(products, 20);
/// assert_eq!(filter.kept.len(), 2);
/// assert_eq!(filter.duplicate_ids, vec![1]);
/// ```
pub fn enforce_catalog_rules(products: Vec<Product>, cap: usize) -> CatalogFilter {
    let mut seen = HashSet::with_capacity(products.len());
    let mut filter = CatalogFilter::default();

    for product in products {
        if !seen.insert(product.id) {
            filter.duplicate_ids.push(product.id);
            continue;
        }

        if filter.kept.len() < cap {
            filter.kept.push(product);
        } else {
            filter.truncated += 1;
        }
    }

    filter
}

// =============================================================================
// Unit Tests
// =============================================================================
