//! Product store abstractions.
//!
//! The store holds the long-lived Products and Suppliers reference data.
//! The checker only ever writes back the stock-status triple on a product
//! (`In Stock`, `Available Supplier`, `Last Checked`), always as a single
//! partial update.

pub mod airtable;
pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Product, StockUpdate, Supplier};

// Re-export for convenience
pub use airtable::AirtableStore;
pub use local::LocalStore;

/// Port for product store backends.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// List all products in the configured view, in store order.
    ///
    /// Failure here is fatal to a batch run.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Find a single product by its public identifier.
    async fn find_product(&self, product_id: &str) -> Result<Option<Product>>;

    /// Resolve a supplier reference to its record.
    async fn get_supplier(&self, supplier_ref: &str) -> Result<Supplier>;

    /// Persist the stock-status triple for one product record.
    async fn update_stock(&self, record_id: &str, update: &StockUpdate) -> Result<()>;
}
