use axum::{body::Bytes, extract::rejection::BytesRejection, http::StatusCode, response::Response};
use serde::Deserialize;
use serde_json::{Deserializer, Map, Value};
use tracing::debug;

use crate::{
    http_err::{json_response, ApiError, ApiResponse},
    mortgage::domain::{self, CalculateRequest},
};

use super::reps;

pub(super) async fn calculate_payment(
    body: Result<Bytes, BytesRejection>,
) -> ApiResponse<Response> {
    let body = body.map_err(|error| {
        debug!(%error, "Failed to read request body.");

        ApiError::InvalidJson
    })?;

    let request = decode_request(&body)?;

    let payment = domain::calculate(&request).map_err(|error| {
        debug!(?request, %error, "Rejected calculation request.");

        ApiError::from(error)
    })?;

    debug!(?request, payment, "Calculated payment.");

    Ok(json_response(
        StatusCode::OK,
        &reps::CalculateResponse::from_payment(payment),
    ))
}

pub(super) async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

/// Decode the first JSON value in the body. Anything following it is ignored.
///
/// The value must be an object or `null`. `null` fields are treated as missing,
/// and the last occurrence of a repeated key wins.
fn decode_request(body: &[u8]) -> ApiResponse<CalculateRequest> {
    let fields = match Deserializer::from_slice(body)
        .into_iter::<Option<Map<String, Value>>>()
        .next()
    {
        Some(Ok(fields)) => fields.unwrap_or_default(),
        Some(Err(error)) => {
            debug!(%error, "Failed to decode calculation request.");

            return Err(ApiError::InvalidJson);
        }
        None => {
            debug!("Received an empty calculation request.");

            return Err(ApiError::InvalidJson);
        }
    };

    let fields = fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect();

    CalculateRequest::deserialize(Value::Object(fields)).map_err(|error| {
        debug!(%error, "Failed to decode calculation request fields.");

        ApiError::InvalidJson
    })
}
