//! Error types for the launch service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Service error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error (bad mode, missing pinning token in live mode).
    Config(String),
    /// Pinning service communication error.
    Pinning(String),
    /// IPFS gateway fetch error.
    Gateway(String),
    /// Policy (orchestrator) failure.
    Policy(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Pinning(msg) => write!(f, "pinning error: {msg}"),
            Error::Gateway(msg) => write!(f, "gateway error: {msg}"),
            Error::Policy(msg) => write!(f, "policy error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Short user-facing label; the full message goes in `details`.
    fn label(&self) -> &'static str {
        match self {
            Error::Config(_) => "Invalid service configuration",
            Error::Pinning(_) => "Failed to reach pinning service",
            Error::Gateway(_) => "Failed to retrieve metadata",
            Error::Policy(_) => "Failed to process request",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Config(_) | Error::Policy(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Pinning(_) | Error::Gateway(_) => StatusCode::BAD_GATEWAY,
        };
        let body = serde_json::json!({
            "error": self.label(),
            "details": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = Error::Pinning("timed out".into());
        assert_eq!(err.to_string(), "pinning error: timed out");
    }

    #[test]
    fn test_status_mapping() {
        let resp = Error::Gateway("404".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let resp = Error::Policy("backend down".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
