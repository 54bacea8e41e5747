// src/pipeline/check.rs

//! Batch stock check over all products.

use chrono::Utc;

use crate::config::CheckerConfig;
use crate::error::Result;
use crate::models::{RunSummary, StockUpdate};
use crate::services::{PageFetcher, StockResolver};
use crate::store::ProductStore;

/// Run one full stock check.
///
/// Products are processed strictly one after another, and each product's
/// suppliers strictly in priority order. Only a failure to enumerate the
/// product list aborts the run; a failing resolve or update is logged and
/// the run moves on to the next product.
pub async fn run_check(
    store: &dyn ProductStore,
    fetcher: &PageFetcher,
    config: &CheckerConfig,
) -> Result<RunSummary> {
    let started_at = Utc::now();

    let products = store.list_products().await?;
    log::info!("Checking inventory for {} products...", products.len());

    let resolver = StockResolver::new(store, fetcher, config);
    let mut summary = RunSummary {
        products_checked: products.len(),
        in_stock: 0,
        out_of_stock: 0,
        update_failures: 0,
        started_at,
        finished_at: started_at,
    };

    for product in &products {
        log::info!("Checking product: {}", product.product_id);

        let outcome = resolver
            .resolve(&product.suppliers)
            .await
            .into_outcome(Utc::now());
        if outcome.found_in_stock {
            summary.in_stock += 1;
        } else {
            summary.out_of_stock += 1;
        }

        let update = StockUpdate::from(outcome);

        if let Err(error) = store.update_stock(&product.record_id, &update).await {
            summary.update_failures += 1;
            log::error!("{error}");
            continue;
        }

        log::info!(
            "Updated {}: {}",
            product.product_id,
            if update.in_stock { "IN STOCK" } else { "OUT OF STOCK" }
        );
    }

    summary.finished_at = Utc::now();
    log::info!("{}", summary.message());
    Ok(summary)
}
