// src/api/utils.rs

use actix_web::HttpResponse;
use log::{debug, warn};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::api::types::ErrorResponse;
use crate::generators::GeneratorError;

/// Field deserializer that turns a mistyped value into `None` instead of
/// rejecting the whole request.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parses a request body, falling back to the default request when the
/// body is empty or not a JSON object.
pub fn parse_body<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty request body, using defaults");
        return T::default();
    }

    match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Malformed request body ({}), using defaults", e);
            T::default()
        }
    }
}

/// Maps an engine failure to its client-facing response
pub fn generator_error_response(error: &GeneratorError) -> HttpResponse {
    match error {
        GeneratorError::InvalidConfiguration(_) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error.to_string()))
        }
        GeneratorError::RequirementsUnsatisfiable { .. } => {
            HttpResponse::UnprocessableEntity().json(ErrorResponse::new(error.to_string()))
        }
    }
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(message))
}
