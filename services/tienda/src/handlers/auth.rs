use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use fundas_domain::user::UserRole;

use crate::error::TiendaServiceError;
use crate::handlers::{BearerHeader, require_user};
use crate::state::AppState;
use crate::usecase::auth::{LoginUseCase, RegisterInput, RegisterUseCase};

/// User as the storefront sees it. The password hash never appears here.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "ciudad")]
    pub city: Option<String>,
    #[serde(rename = "codigo_postal")]
    pub postal_code: Option<String>,
    #[serde(rename = "rol")]
    pub role: UserRole,
    #[serde(rename = "activo")]
    pub is_active: bool,
    #[serde(
        rename = "fecha_registro",
        serialize_with = "fundas_core::serde::to_rfc3339_ms"
    )]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::User> for UserResponse {
    fn from(user: crate::domain::types::User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            city: user.city,
            postal_code: user.postal_code,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "ciudad")]
    pub city: Option<String>,
    #[serde(rename = "codigo_postal")]
    pub postal_code: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, TiendaServiceError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
            phone: body.phone,
            address: body.address,
            city: body.city,
            postal_code: body.postal_code,
        })
        .await?;
    Ok(Json(user.into()))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, TiendaServiceError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        access_token: out.access_token,
        token_type: "bearer",
        user: out.user.into(),
    }))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn get_me(
    State(state): State<AppState>,
    bearer: BearerHeader,
) -> Result<Json<UserResponse>, TiendaServiceError> {
    let user = require_user(&state, &bearer).await?;
    Ok(Json(user.into()))
}
