pub mod admin;
pub mod auth;
pub mod cart;
pub mod order;
pub mod payment;
pub mod product;

use axum::Json;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::domain::types::User;
use crate::error::TiendaServiceError;
use crate::state::AppState;
use crate::usecase::auth::AuthenticateUseCase;

/// Bearer header as handlers receive it. Extraction is optional so that a
/// missing header maps to our own 401 instead of the extractor's 400.
pub type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

/// Resolve a required bearer token to its user, or fail with 401.
pub(crate) async fn require_user(
    state: &AppState,
    bearer: &BearerHeader,
) -> Result<User, TiendaServiceError> {
    let header = bearer.as_ref().ok_or(TiendaServiceError::InvalidToken)?;
    let usecase = AuthenticateUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(header.token()).await
}

/// Resolve an optional bearer token. Anonymous requests and unusable
/// tokens both yield `None`; cart and order creation never reject on auth.
pub(crate) async fn optional_user(state: &AppState, bearer: &BearerHeader) -> Option<User> {
    let header = bearer.as_ref()?;
    let usecase = AuthenticateUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(header.token()).await.ok()
}

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "API Tienda de Fundas de Patines",
        "version": "1.0.0",
    }))
}
