//! Host header validation against `allowed_hosts`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};

use toota_types::{AllowedHosts, Settings};

use super::handlers::json_error;

/// Hosts accepted in debug mode when no list is configured.
const DEBUG_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Returns the host the client addressed: `Host` header, else URI authority.
pub(crate) fn request_host(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))
}

pub(crate) fn host_allowed(settings: &Settings, host: &str) -> bool {
    if settings.debug && settings.allowed_hosts.is_empty() {
        let debug_hosts =
            AllowedHosts::new(DEBUG_HOSTS.iter().map(|h| h.to_string()).collect());
        return debug_hosts.matches(host);
    }
    settings.allowed_hosts.matches(host)
}

/// Rejects requests for hosts this deployment does not serve.
pub async fn allowed_hosts_middleware(
    State(settings): State<Arc<Settings>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Liveness probes come from the platform with internal host names.
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let host = request_host(&request).unwrap_or_default().to_string();
    if host_allowed(&settings, &host) {
        return next.run(request).await;
    }

    tracing::warn!(host = %host, "Rejected request for disallowed host");
    json_error(
        StatusCode::BAD_REQUEST,
        format!("Invalid HTTP_HOST header: {:?}", host),
    )
}
