//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and checking behavior settings
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Product store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Payment gateway settings
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.checker.user_agent.trim().is_empty() {
            return Err(AppError::validation("checker.user_agent is empty"));
        }
        if self.checker.timeout_secs == 0 {
            return Err(AppError::validation("checker.timeout_secs must be > 0"));
        }
        if self.store.api_url.trim().is_empty() {
            return Err(AppError::validation("store.api_url is empty"));
        }
        if self.store.products_table.trim().is_empty() {
            return Err(AppError::validation("store.products_table is empty"));
        }
        if self.store.suppliers_table.trim().is_empty() {
            return Err(AppError::validation("store.suppliers_table is empty"));
        }
        if self.payment.api_url.trim().is_empty() {
            return Err(AppError::validation("payment.api_url is empty"));
        }
        if self.payment.currency.trim().is_empty() {
            return Err(AppError::validation("payment.currency is empty"));
        }
        Ok(())
    }
}

/// HTTP client and supplier-checking behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// User-Agent header for supplier page requests.
    /// Suppliers may reject bot-like requests, so this defaults to a
    /// desktop browser string.
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between supplier requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Product store (Airtable-style REST API) settings.
///
/// The API key is never read from the config file; it comes from the
/// `AIRTABLE_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store API
    #[serde(default = "defaults::store_api_url")]
    pub api_url: String,

    /// Base (workspace) identifier
    #[serde(default)]
    pub base_id: String,

    /// Products table name
    #[serde(default = "defaults::products_table")]
    pub products_table: String,

    /// Suppliers table name
    #[serde(default = "defaults::suppliers_table")]
    pub suppliers_table: String,

    /// View used when listing products
    #[serde(default = "defaults::products_view")]
    pub view: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::store_api_url(),
            base_id: String::new(),
            products_table: defaults::products_table(),
            suppliers_table: defaults::suppliers_table(),
            view: defaults::products_view(),
        }
    }
}

/// Payment gateway settings.
///
/// The secret key comes from the `STRIPE_SECRET_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the payment API
    #[serde(default = "defaults::payment_api_url")]
    pub api_url: String,

    /// Default currency when a request omits one
    #[serde(default = "defaults::currency")]
    pub currency: String,

    /// Metadata source tag attached to payment intents
    #[serde(default = "defaults::metadata_source")]
    pub metadata_source: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::payment_api_url(),
            currency: defaults::currency(),
            metadata_source: defaults::metadata_source(),
        }
    }
}

mod defaults {
    // Checker defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }

    // Store defaults
    pub fn store_api_url() -> String {
        "https://api.airtable.com/v0".into()
    }
    pub fn products_table() -> String {
        "Products".into()
    }
    pub fn suppliers_table() -> String {
        "Suppliers".into()
    }
    pub fn products_view() -> String {
        "All Products".into()
    }

    // Payment defaults
    pub fn payment_api_url() -> String {
        "https://api.stripe.com".into()
    }
    pub fn currency() -> String {
        "usd".into()
    }
    pub fn metadata_source() -> String {
        "volt-speed-ebike-shop".into()
    }
}
