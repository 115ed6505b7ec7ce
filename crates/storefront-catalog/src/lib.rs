//! # storefront-catalog: Catalog Loader for the Storefront
//!
//! This crate fetches the product catalog from a remote HTTP endpoint and
//! publishes the result as a [`LoadState`](storefront_core::LoadState).
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Loader Architecture                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    CatalogLoader (loader.rs)                     │  │
//! │  │                                                                  │  │
//! │  │  One tokio task per load cycle                                   │  │
//! │  │  Fixed-delay retry, bounded budget, CancelToken                  │  │
//! │  └───────────┬───────────────────────────────────┬──────────────────┘  │
//! │              │ fetch()                           │ watch<LoadState>    │
//! │              ▼                                   ▼                      │
//! │  ┌────────────────────────┐          ┌────────────────────────┐        │
//! │  │ CatalogSource (trait)  │          │ LoadHandle             │        │
//! │  │                        │          │                        │        │
//! │  │ HttpCatalogSource      │          │ state() / subscribe()  │        │
//! │  │ reqwest GET + ApiFlavor│          │ wait() / cancel()      │        │
//! │  └────────────────────────┘          └────────────────────────┘        │
//! │                                                                         │
//! │  CatalogConfig (config.rs): TOML file + STOREFRONT_* env overrides      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`cancel`] - Cancellation token for load cycles
//! - [`config`] - Source and loader configuration
//! - [`error`] - Fetch and config error types
//! - [`loader`] - The retry state machine
//! - [`source`] - `CatalogSource` port and HTTP implementation
//! - [`wire`] - Remote API schemas

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cancel;
pub mod config;
pub mod error;
pub mod loader;
pub mod source;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use cancel::CancelToken;
pub use config::{CatalogConfig, LoaderSettings, SourceSettings};
pub use error::{ConfigError, ConfigResult, FetchError, FetchResult};
pub use loader::{CatalogLoader, LoadHandle};
pub use source::{CatalogSource, HttpCatalogSource};
pub use wire::{ApiFlavor, DecodedBatch};
