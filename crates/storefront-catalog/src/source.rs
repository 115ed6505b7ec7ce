//! # Catalog Sources
//!
//! The port the loader fetches through, and its HTTP implementation.
//!
//! ```text
//! ┌──────────────────┐   fetch()   ┌──────────────────────┐   GET    ┌──────────┐
//! │  CatalogLoader   │ ──────────► │  HttpCatalogSource   │ ───────► │  remote  │
//! │  (retry policy)  │ ◄────────── │  status + decode     │ ◄─────── │  API     │
//! └──────────────────┘  Products   └──────────────────────┘   JSON   └──────────┘
//!                       or FetchError
//! ```
//!
//! A source performs exactly one request per call. Retrying is the
//! loader's job.

use async_trait::async_trait;
use std::time::Duration;
use storefront_core::Product;
use tracing::{debug, warn};

use crate::config::SourceSettings;
use crate::error::{FetchError, FetchResult};
use crate::wire::ApiFlavor;

/// Something that can produce the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Performs one fetch attempt.
    async fn fetch(&self) -> FetchResult<Vec<Product>>;

    /// Short description for logs.
    fn describe(&self) -> String {
        "catalog source".to_string()
    }
}

// =============================================================================
// HTTP Source
// =============================================================================

/// Fetches the catalog with a single HTTP `GET`.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
    flavor: ApiFlavor,
    timeout: Duration,
}

impl HttpCatalogSource {
    /// Creates a source for `url`, decoding bodies as `flavor`.
    pub fn new(url: impl Into<String>, flavor: ApiFlavor, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpCatalogSource {
            client,
            url: url.into(),
            flavor,
            timeout,
        })
    }

    /// Creates a source from configuration.
    pub fn from_settings(settings: &SourceSettings) -> FetchResult<Self> {
        Self::new(
            settings.endpoint_url(),
            settings.flavor,
            settings.request_timeout(),
        )
    }

    /// Returns the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> FetchResult<Vec<Product>> {
        debug!(url = %self.url, flavor = %self.flavor, "Requesting catalog");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let batch = self.flavor.decode(&body)?;

        for (id, reason) in &batch.rejected {
            warn!(product_id = id, %reason, "Dropping invalid product record");
        }

        debug!(
            received = batch.products.len() + batch.rejected.len(),
            accepted = batch.products.len(),
            "Catalog response decoded"
        );

        Ok(batch.products)
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.url, self.flavor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/products", addr)
    }

    fn source(url: &str, flavor: ApiFlavor) -> HttpCatalogSource {
        HttpCatalogSource::new(url, flavor, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_fakestore_products() {
        let app = Router::new().route(
            "/products",
            get(|| async {
                r#"[{"id":1,"title":"Shirt","price":19.99,"image":"https://f/1.png"},
                    {"id":2,"title":"Backpack","price":109.95,"image":"https://f/2.png"}]"#
            }),
        );
        let url = serve(app).await;

        let products = source(&url, ApiFlavor::FakeStore).fetch().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Shirt");
        assert_eq!(products[1].price.cents(), 10995);
    }

    #[tokio::test]
    async fn test_fetch_escuela_products() {
        let app = Router::new().route(
            "/products",
            get(|| async {
                r#"[{"id":7,"title":"Table","price":687,"images":["https://e/7a.jpg","https://e/7b.jpg"]}]"#
            }),
        );
        let url = serve(app).await;

        let products = source(&url, ApiFlavor::Escuela).fetch().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].image_url, "https://e/7a.jpg");
    }

    #[tokio::test]
    async fn test_server_error_is_status_failure() {
        let app = Router::new().route(
            "/products",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let url = serve(app).await;

        let err = source(&url, ApiFlavor::Escuela).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500 }));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn test_object_body_is_decode_failure() {
        let app = Router::new().route(
            "/products",
            get(|| async { r#"{"error":"maintenance"}"# }),
        );
        let url = serve(app).await;

        let err = source(&url, ApiFlavor::FakeStore).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/products", addr);
        let err = source(&url, ApiFlavor::Escuela).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let app = Router::new().route(
            "/products",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "[]"
            }),
        );
        let url = serve(app).await;

        let slow = HttpCatalogSource::new(&url, ApiFlavor::Escuela, Duration::from_millis(200)).unwrap();
        let err = slow.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }

    #[test]
    fn test_from_settings_uses_flavor_url() {
        let settings = SourceSettings {
            flavor: ApiFlavor::FakeStore,
            ..SourceSettings::default()
        };
        let source = HttpCatalogSource::from_settings(&settings).unwrap();
        assert_eq!(source.url(), "https://fakestoreapi.com/products");
        assert!(source.describe().contains("fakestore"));
    }
}
