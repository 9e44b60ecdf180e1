use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::mortgage::{domain::CalculationError, http::reps::CalculateResponse};

pub const INVALID_JSON_MESSAGE: &str = "invalid JSON POST";
pub const UNKNOWN_ENDPOINT_MESSAGE: &str = "unknown api endpoint, use POST /";

#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be decoded as a calculation request.
    InvalidJson,
    /// The request was decoded but failed validation.
    InvalidCalculation(CalculationError),
    /// A response body could not be serialized. The diagnostic is returned to
    /// the client.
    InternalServerError(String),
    UnknownEndpoint,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidJson => (StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE).into_response(),
            Self::InvalidCalculation(error) => {
                json_response(StatusCode::BAD_REQUEST, &CalculateResponse::from(&error))
            }
            Self::InternalServerError(diagnostic) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to marshal json?!: {}", diagnostic),
            )
                .into_response(),
            Self::UnknownEndpoint => {
                (StatusCode::NOT_FOUND, UNKNOWN_ENDPOINT_MESSAGE).into_response()
            }
        }
    }
}

impl From<CalculationError> for ApiError {
    fn from(error: CalculationError) -> Self {
        Self::InvalidCalculation(error)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        error!(?error, "Failed to serialize response body.");

        Self::InternalServerError(error.to_string())
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

/// Serialize `value` as the JSON body of a response with the given status.
///
/// Serialization failures are converted into a 500 response.
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(error) => ApiError::from(error).into_response(),
    }
}
