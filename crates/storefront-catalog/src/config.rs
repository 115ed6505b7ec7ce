//! # Catalog Configuration
//!
//! Where the catalog comes from and how hard the loader tries.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the binary)       │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     STOREFRONT_SOURCE=fakestore                                        │
//! │     STOREFRONT_URL=http://localhost:8080/products                      │
//! │     STOREFRONT_MAX_RETRIES / STOREFRONT_RETRY_DELAY_MS / STOREFRONT_CAP │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/storefront/catalog.toml (Linux)                          │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     escuela endpoint, 3 retries, 3000 ms apart, 20 products            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [source]
//! flavor = "escuela"  # escuela | fakestore
//! url = "https://api.escuelajs.co/api/v1/products"
//! request_timeout_secs = 10
//!
//! [loader]
//! max_retries = 3
//! retry_delay_ms = 3000
//! cap = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use storefront_core::DEFAULT_CATALOG_CAP;

use crate::error::{ConfigError, ConfigResult};
use crate::wire::ApiFlavor;

// =============================================================================
// Source Settings
// =============================================================================

/// Which endpoint to fetch and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Wire schema of the endpoint.
    #[serde(default)]
    pub flavor: ApiFlavor,

    /// Endpoint override. The flavor's public URL is used when unset.
    #[serde(default)]
    pub url: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            flavor: ApiFlavor::default(),
            url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SourceSettings {
    /// Returns the URL requests go to.
    pub fn endpoint_url(&self) -> &str {
        self.url
            .as_deref()
            .unwrap_or_else(|| self.flavor.default_url())
    }

    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// Loader Settings
// =============================================================================

/// Retry budget, delay and cap for a load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// Retries after the first failed attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed wait between attempts (milliseconds).
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Maximum number of products kept per cycle.
    #[serde(default = "default_cap")]
    pub cap: usize,
}

fn default_max_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    3000
}
fn default_cap() -> usize {
    DEFAULT_CATALOG_CAP
}

impl Default for LoaderSettings {
    fn default() -> Self {
        LoaderSettings {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            cap: default_cap(),
        }
    }
}

impl LoaderSettings {
    /// Returns the wait between attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

// =============================================================================
// Main Catalog Configuration
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Endpoint settings.
    #[serde(default)]
    pub source: SourceSettings,

    /// Retry behavior.
    #[serde(default)]
    pub loader: LoaderSettings,
}

impl CatalogConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Catalog config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(ref url) = self.source.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(format!(
                    "Catalog URL must start with http:// or https://, got: {}",
                    url
                )));
            }
        }

        if self.loader.cap == 0 {
            return Err(ConfigError::InvalidConfig(
                "cap must be greater than 0".into(),
            ));
        }

        if self.source.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup("STOREFRONT_SOURCE") {
            match source.parse() {
                Ok(flavor) => {
                    debug!(flavor = %source, "Overriding catalog source from environment");
                    self.source.flavor = flavor;
                }
                Err(e) => warn!(source = %source, "{}", e),
            }
        }

        if let Some(url) = lookup("STOREFRONT_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.source.url = Some(url);
        }

        if let Some(retries) = lookup("STOREFRONT_MAX_RETRIES") {
            match retries.parse::<u32>() {
                Ok(n) => self.loader.max_retries = n,
                Err(_) => warn!(value = %retries, "Ignoring invalid STOREFRONT_MAX_RETRIES"),
            }
        }

        if let Some(delay) = lookup("STOREFRONT_RETRY_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.loader.retry_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring invalid STOREFRONT_RETRY_DELAY_MS"),
            }
        }

        if let Some(cap) = lookup("STOREFRONT_CAP") {
            match cap.parse::<usize>() {
                Ok(n) => self.loader.cap = n,
                Err(_) => warn!(value = %cap, "Ignoring invalid STOREFRONT_CAP"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the URL requests go to.
    pub fn endpoint_url(&self) -> &str {
        self.source.endpoint_url()
    }

    /// Returns the wire flavor.
    pub fn flavor(&self) -> ApiFlavor {
        self.source.flavor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.flavor(), ApiFlavor::Escuela);
        assert_eq!(config.endpoint_url(), "https://api.escuelajs.co/api/v1/products");
        assert_eq!(config.loader.max_retries, 3);
        assert_eq!(config.loader.retry_delay(), Duration::from_millis(3000));
        assert_eq!(config.loader.cap, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [source]
            flavor = "fakestore"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint_url(), "https://fakestoreapi.com/products");
        assert_eq!(config.source.request_timeout_secs, 10);
        assert_eq!(config.loader, LoaderSettings::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CatalogConfig::default();

        config.source.url = Some("ftp://example.com/products".into());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.source.url = Some("http://127.0.0.1:8080/products".into());
        assert!(config.validate().is_ok());

        config.loader.cap = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CatalogConfig::default();
        config.apply_overrides_from(env(&[
            ("STOREFRONT_SOURCE", "fakestore"),
            ("STOREFRONT_URL", "http://localhost:9000/p"),
            ("STOREFRONT_MAX_RETRIES", "5"),
            ("STOREFRONT_RETRY_DELAY_MS", "250"),
            ("STOREFRONT_CAP", "8"),
        ]));

        assert_eq!(config.flavor(), ApiFlavor::FakeStore);
        assert_eq!(config.endpoint_url(), "http://localhost:9000/p");
        assert_eq!(config.loader.max_retries, 5);
        assert_eq!(config.loader.retry_delay_ms, 250);
        assert_eq!(config.loader.cap, 8);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = CatalogConfig::default();
        config.apply_overrides_from(env(&[
            ("STOREFRONT_SOURCE", "amazon"),
            ("STOREFRONT_MAX_RETRIES", "many"),
            ("STOREFRONT_CAP", "-1"),
        ]));

        assert_eq!(config.flavor(), ApiFlavor::Escuela);
        assert_eq!(config.loader.max_retries, 3);
        assert_eq!(config.loader.cap, 20);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("storefront-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("catalog.toml");

        let mut config = CatalogConfig::default();
        config.source.flavor = ApiFlavor::FakeStore;
        config.loader.cap = 12;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[source]"));
        assert!(contents.contains("[loader]"));

        let loaded: CatalogConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.flavor(), ApiFlavor::FakeStore);
        assert_eq!(loaded.loader.cap, 12);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", uuid::Uuid::new_v4()));
        let config = CatalogConfig::load_or_default(Some(path));
        assert_eq!(config.loader.cap, 20);
    }
}
