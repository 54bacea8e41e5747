// src/api/stock.rs

//! Stock status read endpoint.
//!
//! The storefront frontend polls this to decide whether to show products
//! as purchasable. Read-only: never triggers a supplier check.

use serde::Serialize;
use serde_json::json;

use crate::api::{ApiRequest, ApiResponse};
use crate::models::Product;
use crate::store::ProductStore;

/// Stock status of one product, as exposed to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStatus {
    pub product_id: String,
    pub name: Option<String>,
    pub in_stock: bool,
    pub available_supplier: String,
    pub last_checked: Option<String>,
    pub price: Option<f64>,
}

impl From<Product> for StockStatus {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name,
            in_stock: product.in_stock,
            available_supplier: product
                .available_supplier
                .unwrap_or_else(|| "Unknown".to_string()),
            last_checked: product.last_checked.map(|t| t.to_rfc3339()),
            price: product.price,
        }
    }
}

/// Handle a stock status query.
///
/// With a `productId` query parameter, returns that product's status or
/// 404; without one, returns the full list.
pub async fn stock_status(store: &dyn ProductStore, request: &ApiRequest) -> ApiResponse {
    if request.method == "OPTIONS" {
        return ApiResponse::preflight();
    }

    if let Some(product_id) = request.query.get("productId") {
        return match store.find_product(product_id).await {
            Ok(Some(product)) => match serde_json::to_value(StockStatus::from(product)) {
                Ok(body) => ApiResponse::json(200, &body),
                Err(e) => ApiResponse::error(500, e.to_string()),
            },
            Ok(None) => ApiResponse::error(404, "Product not found"),
            Err(e) => ApiResponse::error(500, e.to_string()),
        };
    }

    match store.list_products().await {
        Ok(products) => {
            let statuses: Vec<StockStatus> = products.into_iter().map(StockStatus::from).collect();
            match serde_json::to_value(statuses) {
                Ok(body) => ApiResponse::json(200, &json!({ "products": body })),
                Err(e) => ApiResponse::error(500, e.to_string()),
            }
        }
        Err(e) => ApiResponse::error(500, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StockUpdate;
    use crate::store::LocalStore;
    use crate::store::local::StoreData;
    use chrono::Utc;
    use tempfile::TempDir;

    fn product(record_id: &str, product_id: &str, in_stock: bool) -> Product {
        Product {
            record_id: record_id.to_string(),
            product_id: product_id.to_string(),
            name: Some("Volt Speed X1".to_string()),
            price: Some(1299.0),
            suppliers: Vec::new(),
            in_stock,
            available_supplier: in_stock.then(|| "Supplier One".to_string()),
            last_checked: Some(Utc::now()),
        }
    }

    async fn seeded_store(dir: &TempDir, products: Vec<Product>) -> LocalStore {
        let store = LocalStore::new(dir.path().join("store.json"));
        store
            .seed(&StoreData {
                products,
                suppliers: Default::default(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_single_product_status() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir, vec![product("recP1", "volt-x1", true)]).await;

        let response = stock_status(&store, &ApiRequest::get(&[("productId", "volt-x1")])).await;
        assert_eq!(response.status, 200);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["productId"], "volt-x1");
        assert_eq!(body["inStock"], true);
        assert_eq!(body["availableSupplier"], "Supplier One");
        assert_eq!(body["price"], 1299.0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir, vec![]).await;

        let response = stock_status(&store, &ApiRequest::get(&[("productId", "nope")])).await;
        assert_eq!(response.status, 404);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "Product not found");
    }

    #[tokio::test]
    async fn test_full_list() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(
            &dir,
            vec![
                product("recP1", "volt-x1", true),
                product("recP2", "volt-x2", false),
            ],
        )
        .await;

        let response = stock_status(&store, &ApiRequest::get(&[])).await;
        assert_eq!(response.status, 200);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["products"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_never_checked_supplier_reads_unknown() {
        let dir = TempDir::new().unwrap();
        let mut p = product("recP1", "volt-x1", true);
        p.available_supplier = None;
        let store = seeded_store(&dir, vec![p]).await;

        let response = stock_status(&store, &ApiRequest::get(&[("productId", "volt-x1")])).await;
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["availableSupplier"], "Unknown");
    }

    #[tokio::test]
    async fn test_preflight() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir, vec![]).await;

        let request = ApiRequest {
            method: "OPTIONS".to_string(),
            ..ApiRequest::default()
        };
        let response = stock_status(&store, &request).await;
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        assert!(
            response
                .headers
                .iter()
                .any(|(k, v)| k == "Access-Control-Allow-Origin" && v == "*")
        );
    }

    #[tokio::test]
    async fn test_reflects_latest_update() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir, vec![product("recP1", "volt-x1", true)]).await;

        let update = StockUpdate::new(false, None, Utc::now());
        store.update_stock("recP1", &update).await.unwrap();

        let response = stock_status(&store, &ApiRequest::get(&[("productId", "volt-x1")])).await;
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["inStock"], false);
        assert_eq!(body["availableSupplier"], "Out of Stock");
    }
}
