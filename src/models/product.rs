// src/models/product.rs

//! Product record as read from the product store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CheckOutcome;

/// Sentinel written to the supplier-name field when no supplier has stock.
pub const OUT_OF_STOCK: &str = "Out of Stock";

/// A product with its ordered supplier references and current stock status.
///
/// The supplier list is priority-ordered: primary supplier first, backups
/// after. Only the stock-status fields (`in_stock`, `available_supplier`,
/// `last_checked`) are ever written back; everything else is read-only
/// reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Store-internal record identifier (write key)
    pub record_id: String,

    /// Public product identifier
    pub product_id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Price in the store's display currency
    #[serde(default)]
    pub price: Option<f64>,

    /// Ordered supplier record references, primary first
    #[serde(default)]
    pub suppliers: Vec<String>,

    /// Whether at least one supplier currently has stock.
    /// A record that has never been checked reads as true.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Name of the supplier currently fulfilling stock, or the
    /// "Out of Stock" sentinel
    #[serde(default)]
    pub available_supplier: Option<String>,

    /// When the stock status was last refreshed
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
}

fn default_in_stock() -> bool {
    true
}

/// The partial field set written back after a check.
///
/// Always written as a single update so a reader never sees the stock flag
/// from one check and the supplier name from another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockUpdate {
    /// New stock flag
    pub in_stock: bool,

    /// Winning supplier name, or the "Out of Stock" sentinel
    pub available_supplier: String,

    /// Timestamp of the check that produced this update
    pub last_checked: DateTime<Utc>,
}

impl StockUpdate {
    /// Build an update from a resolution result, substituting the sentinel
    /// when no supplier had stock.
    pub fn new(in_stock: bool, winning_supplier: Option<String>, checked_at: DateTime<Utc>) -> Self {
        Self {
            in_stock,
            available_supplier: winning_supplier.unwrap_or_else(|| OUT_OF_STOCK.to_string()),
            last_checked: checked_at,
        }
    }
}

impl From<CheckOutcome> for StockUpdate {
    fn from(outcome: CheckOutcome) -> Self {
        Self::new(
            outcome.found_in_stock,
            outcome.winning_supplier,
            outcome.checked_at,
        )
    }
}
