//! # Wire Formats
//!
//! The remote catalog APIs and how their records map onto the canonical
//! [`Product`].
//!
//! ## Supported Flavors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog API Flavors                              │
//! │                                                                         │
//! │  ESCUELA (default)                    FAKESTORE                         │
//! │  ─────────────────                    ─────────                         │
//! │  api.escuelajs.co/api/v1/products     fakestoreapi.com/products         │
//! │                                                                         │
//! │  { "id": 4,                           { "id": 1,                        │
//! │    "title": "Handmade Fresh Table",     "title": "Fjallraven ...",      │
//! │    "price": 687,                        "price": 109.95,                │
//! │    "images": ["https://...",            "image": "https://..." }        │
//! │               "https://..."] }                                          │
//! │                                                                         │
//! │            │                                    │                       │
//! │            └──────────────┬─────────────────────┘                       │
//! │                           ▼                                             │
//! │            Product { id, title, price: Money, image_url }               │
//! │            (first image, or "" when the array is empty)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Extra fields (description, category, rating, ...) are ignored.

use serde::{Deserialize, Serialize};
use storefront_core::validation::{parse_price, validate_title, ValidationResult};
use storefront_core::{Product, ValidationError};

use crate::error::{ConfigError, FetchResult};

// =============================================================================
// API Flavor
// =============================================================================

/// Which remote product schema a source speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// Records carry an `images` array.
    #[default]
    Escuela,

    /// Records carry a single `image` string.
    FakeStore,
}

impl ApiFlavor {
    /// The endpoint used when no URL is configured.
    pub fn default_url(&self) -> &'static str {
        match self {
            ApiFlavor::Escuela => "https://api.escuelajs.co/api/v1/products",
            ApiFlavor::FakeStore => "https://fakestoreapi.com/products",
        }
    }

    /// Decodes a response body into canonical products.
    ///
    /// The body must be a JSON array of product-shaped records, otherwise
    /// the whole response is a decode failure. Records that decode but break
    /// a domain rule are returned in [`DecodedBatch::rejected`].
    pub fn decode(&self, body: &[u8]) -> FetchResult<DecodedBatch> {
        match self {
            ApiFlavor::Escuela => decode_records::<EscuelaRecord>(body),
            ApiFlavor::FakeStore => decode_records::<FakeStoreRecord>(body),
        }
    }
}

impl std::fmt::Display for ApiFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiFlavor::Escuela => write!(f, "escuela"),
            ApiFlavor::FakeStore => write!(f, "fakestore"),
        }
    }
}

impl std::str::FromStr for ApiFlavor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "escuela" | "escuelajs" | "platzi" => Ok(ApiFlavor::Escuela),
            "fakestore" | "fakestoreapi" => Ok(ApiFlavor::FakeStore),
            other => Err(ConfigError::InvalidConfig(format!(
                "Unknown catalog source: '{}'. Valid options: escuela, fakestore",
                other
            ))),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A wire record that can be turned into a canonical product.
trait WireRecord {
    fn id(&self) -> i64;
    fn into_product(self) -> ValidationResult<Product>;
}

#[derive(Debug, Deserialize)]
struct EscuelaRecord {
    id: i64,
    title: String,
    price: f64,
    #[serde(default)]
    images: Vec<String>,
}

impl WireRecord for EscuelaRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn into_product(self) -> ValidationResult<Product> {
        validate_title(&self.title)?;
        let price = parse_price(self.price)?;
        let image_url = self.images.into_iter().next().unwrap_or_default();
        Ok(Product::new(self.id, self.title, price, image_url))
    }
}

#[derive(Debug, Deserialize)]
struct FakeStoreRecord {
    id: i64,
    title: String,
    price: f64,
    #[serde(default)]
    image: String,
}

impl WireRecord for FakeStoreRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn into_product(self) -> ValidationResult<Product> {
        validate_title(&self.title)?;
        let price = parse_price(self.price)?;
        Ok(Product::new(self.id, self.title, price, self.image))
    }
}

/// Products decoded from one response body.
#[derive(Debug, Default)]
pub struct DecodedBatch {
    /// Valid products in source order.
    pub products: Vec<Product>,

    /// Ids of records that broke a domain rule, with the reason.
    pub rejected: Vec<(i64, ValidationError)>,
}

fn decode_records<R>(body: &[u8]) -> FetchResult<DecodedBatch>
where
    R: WireRecord + for<'de> Deserialize<'de>,
{
    let records: Vec<R> = serde_json::from_slice(body)?;
    let mut batch = DecodedBatch {
        products: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
    };

    for record in records {
        let id = record.id();
        match record.into_product() {
            Ok(product) => batch.products.push(product),
            Err(reason) => batch.rejected.push((id, reason)),
        }
    }

    Ok(batch)
}
