//! HTTP fetching of supplier inventory pages.

use std::time::Duration;

use reqwest::Client;

use crate::config::CheckerConfig;
use crate::error::{AppError, Result};

/// Create a configured HTTP client for supplier page requests.
pub fn create_client(config: &CheckerConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetches supplier pages, returning the raw body text.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher with a client built from the checker configuration.
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a supplier page and return its body as text.
    ///
    /// Any failure (transport error, timeout, non-2xx status) is reported
    /// as `SupplierFetch`; the caller treats it as out of stock for that
    /// supplier only.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let parsed =
            url::Url::parse(url).map_err(|e| AppError::supplier_fetch(url, e))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| AppError::supplier_fetch(url, describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::supplier_fetch(url, format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::supplier_fetch(url, describe(&e)))
    }
}

/// Short human-readable reason for a transport failure.
fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}
