//! End-to-end batch check tests.
//!
//! Drive `run_check` against a local store and mock supplier pages, and
//! against a mock remote store for the fatal list-fetch path.

use std::collections::HashMap;

use chrono::Utc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockwatch::config::{CheckerConfig, StoreConfig};
use stockwatch::error::AppError;
use stockwatch::models::{OUT_OF_STOCK, Product, Supplier};
use stockwatch::pipeline::run_check;
use stockwatch::services::PageFetcher;
use stockwatch::store::local::StoreData;
use stockwatch::store::{AirtableStore, LocalStore, ProductStore};

fn product(record_id: &str, product_id: &str, suppliers: &[&str]) -> Product {
    Product {
        record_id: record_id.to_string(),
        product_id: product_id.to_string(),
        name: Some(product_id.to_string()),
        price: Some(999.0),
        suppliers: suppliers.iter().map(|s| s.to_string()).collect(),
        in_stock: true,
        available_supplier: None,
        last_checked: None,
    }
}

fn supplier(record_id: &str, name: &str, url: String) -> (String, Supplier) {
    (
        record_id.to_string(),
        Supplier {
            record_id: record_id.to_string(),
            name: name.to_string(),
            inventory_url: url,
        },
    )
}

async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn run(store: &LocalStore) -> stockwatch::models::RunSummary {
    let config = CheckerConfig::default();
    let fetcher = PageFetcher::new(&config).unwrap();
    run_check(store, &fetcher, &config).await.unwrap()
}

#[tokio::test]
async fn failed_primary_falls_back_to_third_supplier() {
    let pages = MockServer::start().await;
    mount_page(&pages, "/s2", 200, "Sold out").await;
    mount_page(&pages, "/s3", 200, "Add to cart").await;
    // S1 only serves errors.
    mount_page(&pages, "/s1", 500, "").await;

    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStore::new(dir.path().join("store.json"));
    store
        .seed(&StoreData {
            products: vec![product("recP1", "volt-x1", &["recS1", "recS2", "recS3"])],
            suppliers: HashMap::from([
                supplier("recS1", "S1", format!("{}/s1", pages.uri())),
                supplier("recS2", "S2", format!("{}/s2", pages.uri())),
                supplier("recS3", "S3", format!("{}/s3", pages.uri())),
            ]),
        })
        .await
        .unwrap();

    let summary = run(&store).await;
    assert_eq!(summary.products_checked, 1);
    assert_eq!(summary.in_stock, 1);
    assert_eq!(summary.update_failures, 0);

    let updated = store.find_product("volt-x1").await.unwrap().unwrap();
    assert!(updated.in_stock);
    assert_eq!(updated.available_supplier.as_deref(), Some("S3"));
    assert!(updated.last_checked.is_some());
}

#[tokio::test]
async fn primary_supplier_wins_and_backup_is_never_fetched() {
    let pages = MockServer::start().await;
    mount_page(&pages, "/s1", 200, "In stock - Buy now").await;
    Mock::given(method("GET"))
        .and(path("/s2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("In stock"))
        .expect(0)
        .mount(&pages)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStore::new(dir.path().join("store.json"));
    store
        .seed(&StoreData {
            products: vec![product("recP1", "volt-x1", &["recS1", "recS2"])],
            suppliers: HashMap::from([
                supplier("recS1", "S1", format!("{}/s1", pages.uri())),
                supplier("recS2", "S2", format!("{}/s2", pages.uri())),
            ]),
        })
        .await
        .unwrap();

    let summary = run(&store).await;
    assert_eq!(summary.in_stock, 1);

    let updated = store.find_product("volt-x1").await.unwrap().unwrap();
    assert_eq!(updated.available_supplier.as_deref(), Some("S1"));
}

#[tokio::test]
async fn exhausted_suppliers_write_the_sentinel() {
    let pages = MockServer::start().await;
    mount_page(&pages, "/s1", 200, "Out of stock").await;
    mount_page(&pages, "/s2", 404, "").await;

    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStore::new(dir.path().join("store.json"));
    store
        .seed(&StoreData {
            products: vec![product("recP1", "volt-x1", &["recS1", "recS2"])],
            suppliers: HashMap::from([
                supplier("recS1", "S1", format!("{}/s1", pages.uri())),
                supplier("recS2", "S2", format!("{}/s2", pages.uri())),
            ]),
        })
        .await
        .unwrap();

    let summary = run(&store).await;
    assert_eq!(summary.out_of_stock, 1);

    let updated = store.find_product("volt-x1").await.unwrap().unwrap();
    assert!(!updated.in_stock);
    assert_eq!(updated.available_supplier.as_deref(), Some(OUT_OF_STOCK));
}

#[tokio::test]
async fn product_without_suppliers_is_marked_out_of_stock() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStore::new(dir.path().join("store.json"));
    store
        .seed(&StoreData {
            products: vec![product("recP1", "volt-x1", &[])],
            suppliers: HashMap::new(),
        })
        .await
        .unwrap();

    let summary = run(&store).await;
    assert_eq!(summary.products_checked, 1);
    assert_eq!(summary.out_of_stock, 1);

    let updated = store.find_product("volt-x1").await.unwrap().unwrap();
    assert_eq!(updated.available_supplier.as_deref(), Some(OUT_OF_STOCK));
}

#[tokio::test]
async fn one_product_failing_does_not_block_the_next() {
    let pages = MockServer::start().await;
    mount_page(&pages, "/s2", 200, "Available now").await;

    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStore::new(dir.path().join("store.json"));
    store
        .seed(&StoreData {
            products: vec![
                // recS1 does not exist in the supplier map at all.
                product("recP1", "volt-x1", &["recS1"]),
                product("recP2", "volt-x2", &["recS2"]),
            ],
            suppliers: HashMap::from([supplier("recS2", "S2", format!("{}/s2", pages.uri()))]),
        })
        .await
        .unwrap();

    let summary = run(&store).await;
    assert_eq!(summary.products_checked, 2);
    assert_eq!(summary.in_stock, 1);
    assert_eq!(summary.out_of_stock, 1);

    let second = store.find_product("volt-x2").await.unwrap().unwrap();
    assert!(second.in_stock);
    assert_eq!(second.available_supplier.as_deref(), Some("S2"));
}

#[tokio::test]
async fn list_fetch_failure_aborts_the_run_without_updates() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api)
        .await;
    // No product update may ever be attempted.
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api)
        .await;

    let config = StoreConfig {
        api_url: api.uri(),
        base_id: "appBASE".to_string(),
        ..StoreConfig::default()
    };
    let store = AirtableStore::new(&config, "key-test");

    let checker = CheckerConfig::default();
    let fetcher = PageFetcher::new(&checker).unwrap();
    let err = run_check(&store, &fetcher, &checker).await.unwrap_err();
    assert!(matches!(err, AppError::ListFetch(_)));
}

#[tokio::test]
async fn stock_flag_and_supplier_name_change_together() {
    let pages = MockServer::start().await;
    mount_page(&pages, "/s1", 200, "Buy now").await;

    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStore::new(dir.path().join("store.json"));

    // Start from a record that says out of stock.
    let mut stale = product("recP1", "volt-x1", &["recS1"]);
    stale.in_stock = false;
    stale.available_supplier = Some(OUT_OF_STOCK.to_string());
    stale.last_checked = Some(Utc::now() - chrono::Duration::hours(1));
    let before = stale.last_checked;

    store
        .seed(&StoreData {
            products: vec![stale],
            suppliers: HashMap::from([supplier("recS1", "S1", format!("{}/s1", pages.uri()))]),
        })
        .await
        .unwrap();

    run(&store).await;

    let updated = store.find_product("volt-x1").await.unwrap().unwrap();
    assert!(updated.in_stock);
    assert_eq!(updated.available_supplier.as_deref(), Some("S1"));
    assert!(updated.last_checked > before);
}
