//! HTTP routes.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router, middleware};
use serde::{Deserialize, Serialize};
use tax_core::TaxResult;
use tax_core::validation::{parse_body, parse_tax_input};

use crate::error::ApiError;
use crate::middleware::{cors_layer, request_logger};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
}

/// Builds the application: both endpoints, request logging and CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate-tax", post(calculate_tax_handler))
        .route("/tax-advice", post(tax_advice_handler))
        .layer(middleware::from_fn(request_logger))
        .layer(cors_layer())
        .with_state(state)
}

/// POST /calculate-tax
///
/// The body is read as raw bytes so malformed JSON and a missing
/// content type end up in the same error envelope as field errors.
async fn calculate_tax_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TaxResult>, ApiError> {
    let request = parse_body(&body)?;
    let input = parse_tax_input(&request)?;

    Ok(Json(state.calculator.calculate(&input)))
}

/// POST /tax-advice
async fn tax_advice_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AdviceResponse>, ApiError> {
    let request = parse_body(&body)?;
    let advice = state.advisor.advise_request(&request).await?;

    Ok(Json(AdviceResponse { advice }))
}
