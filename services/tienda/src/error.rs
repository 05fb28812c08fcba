use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Store service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum TiendaServiceError {
    #[error("product not found")]
    ProductNotFound,
    #[error("cart not found")]
    CartNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("payment session not found")]
    SessionNotFound,
    #[error("email already registered")]
    EmailAlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid webhook payload")]
    InvalidWebhook,
    #[error("payment provider not configured")]
    PaymentNotConfigured,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl TiendaServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::CartNotFound => "CART_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidWebhook => "INVALID_WEBHOOK",
            Self::PaymentNotConfigured => "PAYMENT_NOT_CONFIGURED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for TiendaServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ProductNotFound
            | Self::CartNotFound
            | Self::OrderNotFound
            | Self::SessionNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidWebhook => StatusCode::BAD_REQUEST,
            Self::PaymentNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s get logged here: TraceLayer already records method/uri/status
        // for every request, and 4xx are expected client errors. Internal errors
        // carry an anyhow chain that must land in the log to be traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
