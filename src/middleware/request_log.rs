use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::Level;

/// Prefix of the endpoints the tracking pages poll every few seconds.
const TRACKING_PREFIX: &str = "/api/tracking/";

/// Failures log at WARN, successful tracking polls at TRACE, the rest at DEBUG.
pub fn request_log_level(path: &str, status: StatusCode) -> Level {
    if status.is_client_error() || status.is_server_error() {
        Level::WARN
    } else if path.starts_with(TRACKING_PREFIX) {
        Level::TRACE
    } else {
        Level::DEBUG
    }
}

/// Logs every request with client IP, status and latency, including the
/// ones the governor rejects.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            path = %path,
            status = %status,
            "Rate limited"
        );
        return response;
    }

    let level = request_log_level(&path, status);
    if level == Level::WARN {
        tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            path = %path,
            status = %status,
            latency_ms,
            "Request failed"
        );
    } else if level == Level::TRACE {
        tracing::trace!(
            client_ip = %addr.ip(),
            path = %path,
            status = %status,
            latency_ms,
            "Tracking poll served"
        );
    } else {
        tracing::debug!(
            client_ip = %addr.ip(),
            method = %method,
            path = %path,
            status = %status,
            latency_ms,
            "Request completed"
        );
    }

    response
}
