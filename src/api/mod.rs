//! Storefront-facing endpoint handlers.
//!
//! Handlers are plain async functions over the store and gateway ports,
//! exchanging simple request/response structs so they can be driven by the
//! Lambda binary, the CLI, or tests without any HTTP runtime.

pub mod payment;
pub mod stock;

use std::collections::HashMap;

use serde_json::Value;

pub use payment::payment_intent;
pub use stock::stock_status;

/// Inbound endpoint request.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// HTTP method (uppercase)
    pub method: String,

    /// Query string parameters
    pub query: HashMap<String, String>,

    /// Raw request body, if any
    pub body: Option<String>,
}

impl ApiRequest {
    /// Shorthand for a GET request with the given query parameters.
    pub fn get(query: &[(&str, &str)]) -> Self {
        Self {
            method: "GET".to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        }
    }

    /// Shorthand for a POST request with a JSON body.
    pub fn post(body: Value) -> Self {
        Self {
            method: "POST".to_string(),
            query: HashMap::new(),
            body: Some(body.to_string()),
        }
    }
}

/// Outbound endpoint response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: Vec<(String, String)>,

    /// Response body
    pub body: String,
}

impl ApiResponse {
    /// JSON response with CORS headers.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            headers: cors_headers(),
            body: body.to_string(),
        }
    }

    /// Error response: `{"error": message}`.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, &serde_json::json!({ "error": message.into() }))
    }

    /// Empty 200 for CORS preflight.
    pub fn preflight() -> Self {
        Self {
            status: 200,
            headers: cors_headers(),
            body: String::new(),
        }
    }
}

/// CORS headers attached to every endpoint response.
fn cors_headers() -> Vec<(String, String)> {
    vec![
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        ),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}
