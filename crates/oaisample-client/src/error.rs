//! API error types.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the provider API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL could not be parsed or cannot carry a path
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Completion response carried no candidates
    #[error("completion response contained no choices")]
    EmptyResponse,

    /// Cancelled before the call finished
    #[error("request cancelled")]
    Cancelled,
}

/// Turn a non-success response into `ApiError::Api`, passing successes through.
pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(String::from))
        .unwrap_or_else(|| "unknown error".to_string());
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Human-readable message from an error body: the envelope's `message` if
/// present, otherwise the trimmed raw text.
fn error_message(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Some(envelope.error.message);
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
