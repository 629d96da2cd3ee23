use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the fare, promo and ETA computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("unsupported vehicle type: {0}")]
    UnsupportedVehicleType(String),
    #[error("promo code is required")]
    MissingPromoCode,
    #[error("invalid promo code: {0}")]
    InvalidPromoCode(String),
    #[error("invalid promo catalog: {0}")]
    InvalidCatalog(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unable to determine location: {0}")]
    InvalidLocation(String),
    #[error("Unsupported vehicle type: {0}")]
    UnsupportedVehicleType(String),
    #[error("Promo code is required")]
    MissingPromoCode,
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),
    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidLocation(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedVehicleType(_) => StatusCode::BAD_REQUEST,
            AppError::MissingPromoCode => StatusCode::BAD_REQUEST,
            AppError::InvalidPromoCode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidLocation(_) => "INVALID_LOCATION",
            AppError::UnsupportedVehicleType(_) => "UNSUPPORTED_VEHICLE_TYPE",
            AppError::MissingPromoCode => "MISSING_PROMO_CODE",
            AppError::InvalidPromoCode(_) => "INVALID_PROMO_CODE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<FareError> for AppError {
    fn from(err: FareError) -> Self {
        match err {
            FareError::InvalidCoordinate(msg) => AppError::InvalidLocation(msg),
            FareError::UnsupportedVehicleType(vt) => AppError::UnsupportedVehicleType(vt),
            FareError::MissingPromoCode => AppError::MissingPromoCode,
            FareError::InvalidPromoCode(code) => AppError::InvalidPromoCode(code),
            FareError::InvalidCatalog(msg) => AppError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
