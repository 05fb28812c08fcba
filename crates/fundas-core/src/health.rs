use axum::http::StatusCode;

/// Handler for `GET /healthz`, the liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`, the readiness probe. The store serves a
/// single process, so readiness and liveness coincide.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
