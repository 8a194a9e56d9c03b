//! Origin checking for state-changing requests.
//!
//! Unsafe methods carrying an `Origin` header must come from the site itself
//! or from one of `csrf_trusted_origins`. Token validation belongs to the
//! session layer and is not done here.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};

use toota_types::Settings;

use super::handlers::json_error;
use super::hosts::request_host;

fn is_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// Checks an `Origin` value against the request host and the trusted list.
pub(crate) fn origin_allowed(settings: &Settings, origin: &str, host: Option<&str>) -> bool {
    if settings.csrf_trusted_origins.contains(origin) {
        return true;
    }

    let Some(host) = host else {
        return false;
    };
    let origin = origin.trim_end_matches('/').to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    // Behind the platform's TLS terminator the site is always https.
    if origin == format!("https://{}", host) {
        return true;
    }
    settings.debug && origin == format!("http://{}", host)
}

/// Rejects cross-origin unsafe requests.
pub async fn csrf_middleware(
    State(settings): State<Arc<Settings>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_safe_method(request.method()) {
        return next.run(request).await;
    }

    // An unreadable origin is never trusted.
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .map(|o| o.to_str().unwrap_or("null").to_string());
    let Some(origin) = origin else {
        return next.run(request).await;
    };

    if !origin_allowed(&settings, &origin, request_host(&request)) {
        tracing::warn!(
            origin = %origin,
            method = %request.method(),
            path = %request.uri().path(),
            "CSRF origin check failed"
        );
        return json_error(
            StatusCode::FORBIDDEN,
            format!("CSRF verification failed: origin {} is not trusted", origin),
        );
    }

    next.run(request).await
}
