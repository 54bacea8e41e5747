// src/services/resolver.rs

//! Ordered supplier resolution.
//!
//! Walks a product's supplier list strictly in priority order and stops at
//! the first supplier whose page classifies as in stock. A failing supplier
//! (lookup, fetch, or an out-of-stock verdict) never aborts the walk; it
//! simply passes the turn to the next supplier.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::CheckerConfig;
use crate::models::CheckOutcome;
use crate::services::classifier::{Verdict, classify};
use crate::services::fetcher::PageFetcher;
use crate::store::ProductStore;

/// Result of walking one product's supplier list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// True when some supplier classified as in stock
    pub found_in_stock: bool,

    /// Name of the first in-stock supplier, in list order
    pub winning_supplier: Option<String>,
}

impl Resolution {
    /// Stamp this resolution into a per-run check outcome.
    pub fn into_outcome(self, checked_at: DateTime<Utc>) -> CheckOutcome {
        CheckOutcome {
            found_in_stock: self.found_in_stock,
            winning_supplier: self.winning_supplier,
            checked_at,
        }
    }
}

/// Service that resolves stock availability across ranked suppliers.
pub struct StockResolver<'a> {
    store: &'a dyn ProductStore,
    fetcher: &'a PageFetcher,
    request_delay: Duration,
}

impl<'a> StockResolver<'a> {
    /// Create a resolver over the given store and fetcher.
    pub fn new(store: &'a dyn ProductStore, fetcher: &'a PageFetcher, config: &CheckerConfig) -> Self {
        Self {
            store,
            fetcher,
            request_delay: Duration::from_millis(config.request_delay_ms),
        }
    }

    /// Walk the supplier references in order and return the first
    /// confirmed in-stock supplier.
    ///
    /// Suppliers are checked one at a time; ordering expresses business
    /// priority, so the walk is never parallelized. An empty list resolves
    /// to not-in-stock without error.
    pub async fn resolve(&self, supplier_refs: &[String]) -> Resolution {
        for (index, supplier_ref) in supplier_refs.iter().enumerate() {
            if index > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            let supplier = match self.store.get_supplier(supplier_ref).await {
                Ok(supplier) => supplier,
                Err(error) => {
                    log::warn!("Skipping supplier {supplier_ref}: {error}");
                    continue;
                }
            };

            log::info!("Checking supplier: {}", supplier.name);

            let page = match self.fetcher.fetch_page(&supplier.inventory_url).await {
                Ok(page) => page,
                Err(error) => {
                    // Fail closed for this supplier only.
                    log::warn!("Out of stock at {} (fetch failed: {error})", supplier.name);
                    continue;
                }
            };

            match classify(&page) {
                Verdict::InStock => {
                    log::info!("In stock at {}", supplier.name);
                    return Resolution {
                        found_in_stock: true,
                        winning_supplier: Some(supplier.name),
                    };
                }
                Verdict::OutOfStock => {
                    log::info!("Out of stock at {}", supplier.name);
                }
            }
        }

        Resolution::default()
    }
}
