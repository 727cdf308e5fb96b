/// HTTP-level tests driving the router in-process
/// Tests API key handling, status mapping and the response shape
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use credit_risk_api::auth::StaticKeyVerifier;
use credit_risk_api::handlers::AppState;
use credit_risk_api::server::build_router;
use credit_risk_api::service::CreditAssessmentService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TEST_KEY: &str = "test_key_123";

/// Helper function to create a router with one valid key
fn create_test_app() -> Router {
    let state = Arc::new(AppState {
        service: CreditAssessmentService::default(),
        verifier: Arc::new(StaticKeyVerifier::new([TEST_KEY])),
    });
    build_router(state, 1024 * 1024)
}

fn credit_request_body(monthly_income: f64) -> Value {
    json!({
        "user_id": "user_42",
        "cibil_score": 750,
        "utility_bills": [{
            "provider": "City Power",
            "amount": 80.0,
            "due_date": "2024-04-10T00:00:00Z",
            "payment_date": "2024-04-08T00:00:00Z",
            "status": "paid"
        }],
        "bank_transactions": [
            {"date": "2024-04-01T00:00:00Z", "amount": 4000.0, "type": "credit", "category": "salary", "balance_after": 5000.0},
            {"date": "2024-04-05T00:00:00Z", "amount": 800.0, "type": "debit", "category": "rent", "balance_after": 4200.0}
        ],
        "monthly_income": monthly_income,
        "rental_payment": 800.0
    })
}

fn post_credit_score(body: &Value, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/credit-score")
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_open() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "weighted");
}

#[tokio::test]
async fn test_missing_api_key_is_unauthorized() {
    let response = create_test_app()
        .oneshot(post_credit_score(&credit_request_body(4000.0), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_api_key_is_forbidden() {
    let response = create_test_app()
        .oneshot(post_credit_score(&credit_request_body(4000.0), Some("wrong")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid API key");
}

#[tokio::test]
async fn test_valid_request_is_scored() {
    let response = create_test_app()
        .oneshot(post_credit_score(&credit_request_body(4000.0), Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["user_id"], "user_42");
    assert_eq!(body["confidence"], 0.8);
    assert_eq!(body["factors"]["utility_payments"], 0.25);
    assert!(body["timestamp"].is_string());

    // 0.30*750 + 0.25*100 + 0.25*(1 - 0.2) + 0.20*(1 - 0.2)
    let expected = 225.0 + 25.0 + 0.2 + 0.16;
    let risk_score = body["risk_score"].as_f64().unwrap();
    assert!((risk_score - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_zero_income_is_unprocessable() {
    let response = create_test_app()
        .oneshot(post_credit_score(&credit_request_body(0.0), Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("monthly income must be positive"));
}

#[tokio::test]
async fn test_negative_amount_is_bad_request() {
    let mut body = credit_request_body(4000.0);
    body["bank_transactions"][1]["amount"] = json!(-800.0);

    let response = create_test_app()
        .oneshot(post_credit_score(&body, Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vanishing_credit_volume_is_unprocessable() {
    let mut body = credit_request_body(4000.0);
    body["bank_transactions"][0]["amount"] = json!(1e-320);

    let response = create_test_app()
        .oneshot(post_credit_score(&body, Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body.get("risk_score").is_none());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["paths"]["/credit-score"].is_object());
}
