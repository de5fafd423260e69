use serde_json::Value as JsonValue;

use crate::{ApiError, ErrorCategory};

/// Maps an HTTP status code to an error category.
///
/// Returns `None` for 2xx; callers handle success before classifying.
pub fn classify_status(status: u16) -> Option<ErrorCategory> {
    match status {
        200..=299 => None,
        401 => Some(ErrorCategory::Unauthorized),
        429 => Some(ErrorCategory::RateLimited),
        500..=599 => Some(ErrorCategory::ServerError),
        _ => Some(ErrorCategory::ClientError),
    }
}

/// Message and reason extracted from an error response body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub reason: Option<String>,
}

impl ErrorDetails {
    /// Extracts details from a raw body, falling back to the raw text.
    ///
    /// Google APIs wrap failures as
    /// `{"error": {"message": "...", "errors": [{"reason": "..."}]}}`;
    /// bodies that are not JSON objects never fail, they degrade to text.
    pub fn from_body(body: &str) -> Self {
        let Ok(JsonValue::Object(root)) = serde_json::from_str::<JsonValue>(body) else {
            return Self {
                message: body.to_owned(),
                reason: None,
            };
        };

        let error = root.get("error").and_then(JsonValue::as_object);
        let message = error
            .and_then(|error| non_empty_str(error.get("message")))
            .or_else(|| non_empty_str(root.get("message")))
            .unwrap_or(body)
            .to_owned();
        let reason = error
            .and_then(|error| error.get("errors"))
            .and_then(JsonValue::as_array)
            .and_then(|errors| errors.first())
            .and_then(JsonValue::as_object)
            .and_then(|first| first.get("reason"))
            .and_then(JsonValue::as_str)
            .map(str::to_owned);

        Self { message, reason }
    }
}

fn non_empty_str(value: Option<&JsonValue>) -> Option<&str> {
    value
        .and_then(JsonValue::as_str)
        .filter(|text| !text.is_empty())
}

/// Builds the terminal error for a failed response, or `None` on 2xx.
pub(crate) fn classify_response(status: u16, body: &str) -> Option<ApiError> {
    let category = classify_status(status)?;
    let ErrorDetails { message, reason } = ErrorDetails::from_body(body);
    Some(ApiError {
        category,
        status,
        message,
        reason,
    })
}
