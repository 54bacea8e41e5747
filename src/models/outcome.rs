// src/models/outcome.rs

//! Per-product and per-run check results.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of checking one product in one run.
///
/// Superseded by the next run; no history is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Whether any supplier reported stock
    pub found_in_stock: bool,

    /// Name of the first supplier (in priority order) with stock
    pub winning_supplier: Option<String>,

    /// When the check happened
    pub checked_at: DateTime<Utc>,
}

/// Summary of a full batch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of products processed
    pub products_checked: usize,

    /// Products that resolved to in-stock
    pub in_stock: usize,

    /// Products that resolved to out-of-stock
    pub out_of_stock: usize,

    /// Products whose stock update could not be persisted
    pub update_failures: usize,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Human-readable success message, matching the scheduled endpoint's
    /// response body.
    pub fn message(&self) -> String {
        format!("Checked {} products", self.products_checked)
    }
}
