//! Request correlation and optional API-key auth middleware.

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::OnceLock;
use subtle::ConstantTimeEq;

/// Cached API key from env. `None` = dev mode (no auth).
static API_KEY: OnceLock<Option<String>> = OnceLock::new();

fn expected_api_key() -> &'static Option<String> {
    API_KEY.get_or_init(|| {
        std::env::var("MINILAUNCH_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
    })
}

fn provided_api_key(request: &Request) -> Option<&str> {
    let headers = request.headers();
    if let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        return Some(key);
    }
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Validate `X-Api-Key` (or `Authorization: Bearer`) against
/// `MINILAUNCH_API_KEY`. Skipped entirely when the key is unset (dev mode).
/// Comparison is constant-time.
pub async fn api_key_auth(request: Request, next: Next) -> Response {
    let Some(expected) = expected_api_key() else {
        return next.run(request).await;
    };

    let authorized = provided_api_key(&request).is_some_and(|key| {
        key.len() == expected.len() && bool::from(key.as_bytes().ct_eq(expected.as_bytes()))
    });

    if authorized {
        next.run(request).await
    } else {
        let body = serde_json::json!({
            "error": "Unauthorized: invalid or missing API key"
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Propagate or generate `x-request-id`, stored in request extensions for
/// handlers and echoed on the response.
pub async fn inject_request_id(mut request: Request, next: Next) -> Response {
    let request_id = match request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
    {
        Some(id) => id.to_string(),
        None => {
            use rand::Rng;
            format!("ml-{:016x}", rand::thread_rng().gen::<u64>())
        }
    };

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;
    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", val);
    }
    response
}

/// Request correlation ID, extractable from `Request::extensions()`.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);
