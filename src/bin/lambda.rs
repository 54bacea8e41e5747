//! AWS Lambda entry point for Stockwatch
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//! A scheduled rule invokes the `check` action every 15-60 minutes; the
//! storefront invokes `status` and `payment-intent` on demand.

use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use serde_json::{Value, json};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockwatch::api::{ApiRequest, payment_intent, stock_status};
use stockwatch::config::Config;
use stockwatch::error::Result;
use stockwatch::payment::StripeGateway;
use stockwatch::pipeline::run_check;
use stockwatch::services::PageFetcher;
use stockwatch::store::AirtableStore;

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> std::result::Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Stockwatch Lambda starting...");
    lambda_runtime::run(service_fn(handler)).await
}

/// Handler for AWS Lambda events.
///
/// The event's `action` field selects the operation:
/// - `"check"` (default): run the full inventory check
/// - `"status"`: stock query, optional `productId`
/// - `"payment-intent"`: create a payment authorization
async fn handler(event: LambdaEvent<Value>) -> std::result::Result<Value, LambdaError> {
    let payload = event.payload;
    let action = payload
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or("check");

    info!("Handling action: {action}");

    let config = Config::load_or_default(
        std::env::var("STOCKWATCH_CONFIG").unwrap_or_else(|_| "stockwatch.toml".to_string()),
    );

    match action {
        "check" => match run_inventory_check(&config).await {
            Ok(message) => Ok(json!({ "success": true, "message": message })),
            Err(e) => {
                error!("Inventory check failed: {e}");
                Ok(with_status(500, json!({ "error": e.to_string() })))
            }
        },

        "status" => {
            let store = AirtableStore::from_env(&config.store)
                .map_err(|e| LambdaError::from(e.to_string()))?;
            let query: Vec<(&str, &str)> = payload
                .get("productId")
                .and_then(Value::as_str)
                .map(|id| vec![("productId", id)])
                .unwrap_or_default();
            let response = stock_status(&store, &ApiRequest::get(&query)).await;
            Ok(api_response_to_json(response))
        }

        "payment-intent" => {
            let gateway = StripeGateway::from_env(&config.payment)
                .map_err(|e| LambdaError::from(e.to_string()))?;
            let body = payload.get("body").cloned().unwrap_or(Value::Null);
            let response = payment_intent(&gateway, &ApiRequest::post(body)).await;
            Ok(api_response_to_json(response))
        }

        other => Ok(with_status(400, json!({ "error": format!("Unknown action: {other}") }))),
    }
}

/// Run the scheduled inventory check and return the success message.
async fn run_inventory_check(config: &Config) -> Result<String> {
    let store = AirtableStore::from_env(&config.store)?;
    let fetcher = PageFetcher::new(&config.checker)?;
    let summary = run_check(&store, &fetcher, &config.checker).await?;

    info!(
        "Check complete: {} in stock, {} out of stock, {} update failures",
        summary.in_stock, summary.out_of_stock, summary.update_failures
    );
    Ok(summary.message())
}

fn with_status(status: u16, mut body: Value) -> Value {
    if let Some(map) = body.as_object_mut() {
        map.insert("statusCode".to_string(), json!(status));
    }
    body
}

fn api_response_to_json(response: stockwatch::api::ApiResponse) -> Value {
    let body: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);
    json!({
        "statusCode": response.status,
        "headers": response
            .headers
            .iter()
            .cloned()
            .collect::<std::collections::HashMap<String, String>>(),
        "body": body,
    })
}
