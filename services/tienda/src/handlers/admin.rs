use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::TiendaServiceError;
use crate::handlers::auth::UserResponse;
use crate::handlers::{BearerHeader, require_user};
use crate::state::AppState;
use crate::usecase::auth::{ListUsersUseCase, require_admin};
use crate::usecase::stats::GetStatisticsUseCase;

// ── GET /admin/usuarios ──────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    bearer: BearerHeader,
) -> Result<Json<Vec<UserResponse>>, TiendaServiceError> {
    let acting = require_user(&state, &bearer).await?;
    require_admin(&acting)?;

    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── GET /admin/estadisticas ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatisticsResponse {
    #[serde(rename = "total_productos")]
    pub total_products: u64,
    #[serde(rename = "total_usuarios")]
    pub total_users: u64,
    #[serde(rename = "total_pedidos")]
    pub total_orders: u64,
    #[serde(rename = "ventas_mes")]
    pub monthly_sales: f64,
}

pub async fn get_statistics(
    State(state): State<AppState>,
    bearer: BearerHeader,
) -> Result<Json<StatisticsResponse>, TiendaServiceError> {
    let acting = require_user(&state, &bearer).await?;
    require_admin(&acting)?;

    let usecase = GetStatisticsUseCase {
        products: state.product_repo(),
        users: state.user_repo(),
        orders: state.order_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(StatisticsResponse {
        total_products: stats.total_products,
        total_users: stats.total_users,
        total_orders: stats.total_orders,
        monthly_sales: stats.monthly_sales,
    }))
}
