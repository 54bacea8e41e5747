// src/api/payment.rs

//! Payment intent creation endpoint.

use serde::Deserialize;
use serde_json::json;

use crate::api::{ApiRequest, ApiResponse};
use crate::payment::{MIN_AMOUNT_CENTS, PaymentGateway};

/// Checkout request body.
#[derive(Debug, Deserialize)]
struct PaymentRequest {
    /// Amount in cents
    amount: Option<f64>,

    /// Defaults to USD when omitted
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// Handle a payment intent creation request.
///
/// Validates the amount (integer cents, minimum 50) and delegates to the
/// gateway; the response carries the client secret the frontend needs to
/// confirm the payment.
pub async fn payment_intent(gateway: &dyn PaymentGateway, request: &ApiRequest) -> ApiResponse {
    if request.method != "POST" {
        return ApiResponse::error(405, "Method Not Allowed");
    }

    let parsed: PaymentRequest = match request
        .body
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
    {
        Ok(Some(parsed)) => parsed,
        Ok(None) | Err(_) => return invalid_amount(),
    };

    let amount = match parsed.amount {
        Some(amount) if amount >= MIN_AMOUNT_CENTS as f64 => amount.round() as i64,
        _ => return invalid_amount(),
    };

    match gateway.create_intent(amount, &parsed.currency).await {
        Ok(intent) => ApiResponse::json(
            200,
            &json!({
                "clientSecret": intent.client_secret,
                "paymentIntentId": intent.intent_id,
            }),
        ),
        Err(e) => ApiResponse::error(500, e.to_string()),
    }
}

fn invalid_amount() -> ApiResponse {
    ApiResponse::error(400, "Invalid amount. Minimum $0.50 USD")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::payment::PaymentIntent;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Gateway double recording the requested amount and currency.
    struct RecordingGateway {
        calls: Mutex<Vec<(i64, String)>>,
        fail: bool,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn create_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent> {
            self.calls
                .lock()
                .unwrap()
                .push((amount, currency.to_string()));
            if self.fail {
                return Err(AppError::payment("card declined"));
            }
            Ok(PaymentIntent {
                client_secret: "pi_1_secret".to_string(),
                intent_id: "pi_1".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_successful_intent() {
        let gateway = RecordingGateway::new();
        let request = ApiRequest::post(json!({ "amount": 1299 }));

        let response = payment_intent(&gateway, &request).await;
        assert_eq!(response.status, 200);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["clientSecret"], "pi_1_secret");
        assert_eq!(body["paymentIntentId"], "pi_1");

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(1299, "usd".to_string())]);
    }

    #[tokio::test]
    async fn test_non_post_is_rejected() {
        let gateway = RecordingGateway::new();
        let response = payment_intent(&gateway, &ApiRequest::get(&[])).await;
        assert_eq!(response.status, 405);
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_amount_below_minimum_is_rejected() {
        let gateway = RecordingGateway::new();
        let request = ApiRequest::post(json!({ "amount": 49 }));
        let response = payment_intent(&gateway, &request).await;
        assert_eq!(response.status, 400);
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_minimum_amount_is_accepted() {
        let gateway = RecordingGateway::new();
        let request = ApiRequest::post(json!({ "amount": 50 }));
        let response = payment_intent(&gateway, &request).await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_missing_body_is_rejected() {
        let gateway = RecordingGateway::new();
        let request = ApiRequest {
            method: "POST".to_string(),
            ..ApiRequest::default()
        };
        let response = payment_intent(&gateway, &request).await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_fractional_amount_is_rounded() {
        let gateway = RecordingGateway::new();
        let request = ApiRequest::post(json!({ "amount": 1299.6, "currency": "eur" }));
        payment_intent(&gateway, &request).await;

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(1300, "eur".to_string())]);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_500() {
        let gateway = RecordingGateway::failing();
        let request = ApiRequest::post(json!({ "amount": 1299 }));
        let response = payment_intent(&gateway, &request).await;
        assert_eq!(response.status, 500);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert!(body["error"].as_str().unwrap().contains("card declined"));
    }
}
