// src/error.rs

//! Unified error handling for the stock checker.

use std::fmt;

use thiserror::Error;

/// Result type alias for stockwatch operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Product list could not be enumerated. Fatal for a batch run.
    #[error("Failed to fetch product list: {0}")]
    ListFetch(String),

    /// A supplier page could not be fetched (transport error or bad status).
    /// Recovered per supplier: treated as out of stock for that supplier.
    #[error("Supplier fetch failed for {url}: {reason}")]
    SupplierFetch { url: String, reason: String },

    /// A supplier reference could not be resolved to a record.
    #[error("Supplier lookup failed for {supplier_ref}: {message}")]
    SupplierLookup {
        supplier_ref: String,
        message: String,
    },

    /// A product stock update could not be persisted.
    #[error("Stock update failed for {product_id}: {message}")]
    UpdateWrite { product_id: String, message: String },

    /// Payment gateway error
    #[error("Payment error: {0}")]
    Payment(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fatal list-fetch error.
    pub fn list_fetch(message: impl fmt::Display) -> Self {
        Self::ListFetch(message.to_string())
    }

    /// Create a per-supplier fetch error.
    pub fn supplier_fetch(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::SupplierFetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a supplier lookup error.
    pub fn supplier_lookup(supplier_ref: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::SupplierLookup {
            supplier_ref: supplier_ref.into(),
            message: message.to_string(),
        }
    }

    /// Create a stock update error.
    pub fn update_write(product_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::UpdateWrite {
            product_id: product_id.into(),
            message: message.to_string(),
        }
    }

    /// Create a payment error.
    pub fn payment(message: impl Into<String>) -> Self {
        Self::Payment(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
