use crate::auth::CredentialVerifier;
use crate::errors::AppError;
use crate::models::{AssessmentResult, CreditRequest};
use crate::service::CreditAssessmentService;
use crate::validation::validate_request;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Assessment pipeline with the scoring model selected at startup.
    pub service: CreditAssessmentService,
    /// Checks the `X-API-Key` header on protected routes.
    pub verifier: Arc<dyn CredentialVerifier>,
}

/// Health check endpoint.
///
/// Returns the service status, version and the scoring model in use.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "credit-risk-api",
            "version": env!("CARGO_PKG_VERSION"),
            "model": state.service.model_name(),
        })),
    )
}

/// POST /credit-score
///
/// Scores one applicant from their bureau score, utility bills and bank ledger.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - JSON body with the applicant's evidence.
///
/// # Returns
///
/// * `Result<Json<AssessmentResult>, AppError>` - The assessment, or a 400 for malformed
///   fields and a 422 when the pipeline cannot score the request.
#[utoipa::path(
    post,
    path = "/credit-score",
    request_body = CreditRequest,
    responses(
        (status = 200, description = "Assessment computed", body = AssessmentResult),
        (status = 400, description = "Malformed request fields"),
        (status = 401, description = "Missing API key"),
        (status = 403, description = "Invalid API key"),
        (status = 422, description = "Request cannot be scored"),
    ),
    security(("api_key" = []))
)]
pub async fn credit_score(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreditRequest>,
) -> Result<Json<AssessmentResult>, AppError> {
    tracing::info!(
        "POST /credit-score - user_id: {}, bills: {}, transactions: {}",
        request.user_id,
        request.utility_bills.len(),
        request.bank_transactions.len()
    );

    validate_request(&request)?;

    let result = state.service.assess(&request)?;

    tracing::info!(
        "Assessment complete for {}: risk_score={:.2}, confidence={:.2}",
        result.user_id,
        result.risk_score,
        result.confidence
    );

    Ok(Json(result))
}
