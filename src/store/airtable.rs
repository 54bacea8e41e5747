// src/store/airtable.rs

//! Airtable-style REST store backend.
//!
//! Talks to a hosted base holding the `Products` and `Suppliers` tables.
//! Listing paginates with the `offset` cursor; stock updates are partial
//! `PATCH`es carrying only the stock-status triple.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::StoreConfig;
use crate::error::{AppError, Result};
use crate::models::{Product, StockUpdate, Supplier};
use crate::store::ProductStore;

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "AIRTABLE_API_KEY";

/// REST store backend.
#[derive(Clone)]
pub struct AirtableStore {
    client: Client,
    api_url: String,
    api_key: String,
    base_id: String,
    products_table: String,
    suppliers_table: String,
    view: String,
}

impl AirtableStore {
    /// Create a store from configuration and an explicit API key.
    pub fn new(config: &StoreConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            base_id: config.base_id.clone(),
            products_table: config.products_table.clone(),
            suppliers_table: config.suppliers_table.clone(),
            view: config.view.clone(),
        }
    }

    /// Create a store reading the API key from the environment.
    pub fn from_env(config: &StoreConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AppError::config(format!("{API_KEY_ENV} is not set")))?;
        if config.base_id.trim().is_empty() {
            return Err(AppError::config("store.base_id is not configured"));
        }
        Ok(Self::new(config, api_key))
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, table)
    }

    fn record_url(&self, table: &str, record_id: &str) -> String {
        format!("{}/{}", self.table_url(table), record_id)
    }

    async fn fetch_product_page(&self, offset: Option<&str>) -> Result<ProductPage> {
        let mut request = self
            .client
            .get(self.table_url(&self.products_table))
            .bearer_auth(&self.api_key)
            .query(&[("view", self.view.as_str())]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::list_fetch(format!("HTTP {}", status.as_u16())));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ProductStore for AirtableStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self
                .fetch_product_page(offset.as_deref())
                .await
                .map_err(|e| match e {
                    e @ AppError::ListFetch(_) => e,
                    other => AppError::list_fetch(other),
                })?;

            products.extend(page.records.into_iter().map(ProductRecord::into_product));

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(products)
    }

    async fn find_product(&self, product_id: &str) -> Result<Option<Product>> {
        let formula = format!("{{Product ID}} = '{}'", product_id.replace('\'', "\\'"));
        let response = self
            .client
            .get(self.table_url(&self.products_table))
            .bearer_auth(&self.api_key)
            .query(&[("filterByFormula", formula.as_str()), ("maxRecords", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::list_fetch(format!("HTTP {}", status.as_u16())));
        }

        let page: ProductPage = response.json().await?;
        Ok(page
            .records
            .into_iter()
            .next()
            .map(ProductRecord::into_product))
    }

    async fn get_supplier(&self, supplier_ref: &str) -> Result<Supplier> {
        let response = self
            .client
            .get(self.record_url(&self.suppliers_table, supplier_ref))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::supplier_lookup(supplier_ref, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::supplier_lookup(
                supplier_ref,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let record: SupplierRecord = response
            .json()
            .await
            .map_err(|e| AppError::supplier_lookup(supplier_ref, e))?;
        Ok(record.into_supplier())
    }

    async fn update_stock(&self, record_id: &str, update: &StockUpdate) -> Result<()> {
        let body = json!({
            "fields": {
                "In Stock": update.in_stock,
                "Available Supplier": update.available_supplier,
                "Last Checked": update.last_checked.to_rfc3339(),
            }
        });

        let response = self
            .client
            .patch(self.record_url(&self.products_table, record_id))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::update_write(record_id, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::update_write(
                record_id,
                format!("HTTP {}", status.as_u16()),
            ));
        }
        Ok(())
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
struct ProductPage {
    records: Vec<ProductRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: String,
    #[serde(default)]
    fields: ProductFields,
}

#[derive(Debug, Deserialize, Default)]
struct ProductFields {
    #[serde(rename = "Product ID", default)]
    product_id: String,

    #[serde(rename = "Name", default)]
    name: Option<String>,

    #[serde(rename = "Price", default)]
    price: Option<f64>,

    #[serde(rename = "Suppliers", default)]
    suppliers: Vec<String>,

    #[serde(rename = "In Stock", default)]
    in_stock: Option<bool>,

    #[serde(rename = "Available Supplier", default)]
    available_supplier: Option<String>,

    #[serde(rename = "Last Checked", default)]
    last_checked: Option<DateTime<Utc>>,
}

impl ProductRecord {
    fn into_product(self) -> Product {
        Product {
            record_id: self.id,
            product_id: self.fields.product_id,
            name: self.fields.name,
            price: self.fields.price,
            suppliers: self.fields.suppliers,
            // A record that has never been checked reads as in stock.
            in_stock: self.fields.in_stock.unwrap_or(true),
            available_supplier: self.fields.available_supplier,
            last_checked: self.fields.last_checked,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupplierRecord {
    id: String,
    #[serde(default)]
    fields: SupplierFields,
}

#[derive(Debug, Deserialize, Default)]
struct SupplierFields {
    #[serde(rename = "Name", default)]
    name: String,

    #[serde(rename = "Inventory URL", default)]
    inventory_url: String,
}

impl SupplierRecord {
    fn into_supplier(self) -> Supplier {
        Supplier {
            record_id: self.id,
            name: self.fields.name,
            inventory_url: self.fields.inventory_url,
        }
    }
}
