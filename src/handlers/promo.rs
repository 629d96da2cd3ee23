use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::fare::PromoCode;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PromoListResponse {
    pub version: String,
    pub promos: Vec<PromoCode>,
}

#[derive(Debug, Deserialize)]
pub struct ValidatePromoRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidatePromoResponse {
    pub valid: bool,
    pub promo: PromoCode,
}

/// List the promo catalog
pub async fn list_promos(State(state): State<AppState>) -> Json<PromoListResponse> {
    Json(PromoListResponse {
        version: state.promos.version().to_string(),
        promos: state.promos.codes().to_vec(),
    })
}

/// Validate a code the user submitted from the promo widget
pub async fn validate_promo(
    State(state): State<AppState>,
    payload: Result<Json<ValidatePromoRequest>, JsonRejection>,
) -> AppResult<Json<ValidatePromoResponse>> {
    let Json(payload) = payload?;

    let promo = state.promos.validate_submission(&payload.code).inspect_err(|e| {
        tracing::debug!(code = %payload.code, error = %e, "Promo code rejected");
    })?;

    Ok(Json(ValidatePromoResponse {
        valid: true,
        promo: promo.clone(),
    }))
}
