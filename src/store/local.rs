//! Local JSON-file store backend.
//!
//! Keeps products and suppliers in a single JSON document on disk, for
//! development and testing. Production deployments use `AirtableStore`.
//!
//! ## File Layout
//!
//! ```text
//! {
//!   "products": [ { "record_id": ..., "product_id": ..., ... } ],
//!   "suppliers": { "rec...": { "record_id": ..., "name": ..., ... } }
//! }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Product, StockUpdate, Supplier};
use crate::store::ProductStore;

/// On-disk document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub suppliers: HashMap<String, Supplier>,
}

/// File-backed store.
pub struct LocalStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within one process.
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Create a store backed by the given JSON file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Write an initial document, replacing any existing file.
    pub async fn seed(&self, data: &StoreData) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_data(data).await
    }

    async fn read_data(&self) -> Result<StoreData> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreData::default()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write the document atomically (write to temp, then rename).
    async fn write_data(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for LocalStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        match self.read_data().await {
            Ok(data) => Ok(data.products),
            Err(e) => Err(AppError::list_fetch(e)),
        }
    }

    async fn find_product(&self, product_id: &str) -> Result<Option<Product>> {
        let data = self.read_data().await?;
        Ok(data
            .products
            .into_iter()
            .find(|p| p.product_id == product_id))
    }

    async fn get_supplier(&self, supplier_ref: &str) -> Result<Supplier> {
        let data = self
            .read_data()
            .await
            .map_err(|e| AppError::supplier_lookup(supplier_ref, e))?;
        data.suppliers
            .get(supplier_ref)
            .cloned()
            .ok_or_else(|| AppError::supplier_lookup(supplier_ref, "no such supplier"))
    }

    async fn update_stock(&self, record_id: &str, update: &StockUpdate) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut data = self
            .read_data()
            .await
            .map_err(|e| AppError::update_write(record_id, e))?;

        let product = data
            .products
            .iter_mut()
            .find(|p| p.record_id == record_id)
            .ok_or_else(|| AppError::update_write(record_id, "no such product record"))?;

        product.in_stock = update.in_stock;
        product.available_supplier = Some(update.available_supplier.clone());
        product.last_checked = Some(update.last_checked);

        self.write_data(&data)
            .await
            .map_err(|e| AppError::update_write(record_id, e))
    }
}
