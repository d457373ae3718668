//! XSRF (Cross-Site Request Forgery) protection middleware and utilities.
//!
//! Provides token generation, validation, and middleware for protecting
//! state-changing requests (POST, PUT, DELETE, PATCH). Forms carry the token
//! in a hidden `_xsrf_token` field; AJAX requests use the `X-XSRF-Token` header.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

/// The header name for XSRF tokens in AJAX/HTMX requests.
pub const XSRF_HEADER: &str = "X-XSRF-Token";

/// The form field name for XSRF tokens in form submissions.
pub const XSRF_FORM_FIELD: &str = "_xsrf_token";

/// XSRF token storage that can be shared across the application.
#[derive(Clone)]
pub struct XsrfToken(Arc<String>);

impl XsrfToken {
    /// Generate a new random XSRF token.
    pub fn generate() -> Self {
        Self(Arc::new(Uuid::new_v4().to_string()))
    }

    /// Get the token value as a string.
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Middleware that validates XSRF tokens on state-changing requests.
pub async fn xsrf_middleware(
    xsrf_token: XsrfToken,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !matches!(
        request.method(),
        &Method::POST | &Method::PUT | &Method::DELETE | &Method::PATCH
    ) {
        return next.run(request).await;
    }

    // Header token first (HTMX/AJAX requests)
    if let Some(token) = request
        .headers()
        .get(XSRF_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        if token == xsrf_token.value() {
            return next.run(request).await;
        }
        return xsrf_error_response();
    }

    // Form submissions carry the token in the body
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    if is_form {
        let (parts, body) = request.into_parts();
        let bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(b) => b,
            Err(_) => return xsrf_error_response(),
        };

        let body_str = match std::str::from_utf8(&bytes) {
            Ok(s) => s,
            Err(_) => return xsrf_error_response(),
        };

        if form_token(body_str).as_deref() == Some(xsrf_token.value()) {
            // Hand the request back with the body we consumed
            let body = Body::from(bytes);
            return next.run(Request::from_parts(parts, body)).await;
        }

        return xsrf_error_response();
    }

    // Other content types (JSON, multipart) must use the header
    xsrf_error_response()
}

/// Extract the XSRF token from a URL-encoded form body.
fn form_token(body: &str) -> Option<String> {
    body.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == XSRF_FORM_FIELD {
            let spaced = value.replace('+', " ");
            urlencoding::decode(&spaced).ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

fn xsrf_error_response() -> Response {
    (StatusCode::FORBIDDEN, "Invalid or missing XSRF token").into_response()
}
