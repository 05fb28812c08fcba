use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Cart, CartItem};
use crate::error::TiendaServiceError;
use crate::handlers::{BearerHeader, optional_user};
use crate::state::AppState;
use crate::usecase::cart::{CreateCartInput, CreateCartUseCase, GetCartUseCase};

// ── DTOs ─────────────────────────────────────────────────────────────────────

#[derive(Deserialize, Serialize)]
pub struct CartItemBody {
    #[serde(rename = "producto_id")]
    pub product_id: Uuid,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "talla")]
    pub size: String,
    pub color: String,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub id: String,
    pub items: Vec<CartItemBody>,
    #[serde(rename = "usuario_id")]
    pub user_id: Option<String>,
    pub total: f64,
    #[serde(
        rename = "fecha_creacion",
        serialize_with = "fundas_core::serde::to_rfc3339_ms"
    )]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id.to_string(),
            items: cart
                .items
                .into_iter()
                .map(|item| CartItemBody {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    size: item.size,
                    color: item.color,
                })
                .collect(),
            user_id: cart.user_id.map(|id| id.to_string()),
            total: cart.total,
            created_at: cart.created_at,
        }
    }
}

// ── POST /carrito ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCartRequest {
    pub items: Vec<CartItemBody>,
}

pub async fn create_cart(
    State(state): State<AppState>,
    bearer: BearerHeader,
    Json(body): Json<CreateCartRequest>,
) -> Result<Json<CartResponse>, TiendaServiceError> {
    let user_id = optional_user(&state, &bearer).await.map(|user| user.id);

    let usecase = CreateCartUseCase {
        carts: state.cart_repo(),
        products: state.product_repo(),
    };
    let cart = usecase
        .execute(CreateCartInput {
            items: body
                .items
                .into_iter()
                .map(|item| CartItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    size: item.size,
                    color: item.color,
                })
                .collect(),
            user_id,
        })
        .await?;
    Ok(Json(cart.into()))
}

// ── GET /carrito/{id} ────────────────────────────────────────────────────────

pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CartResponse>, TiendaServiceError> {
    let usecase = GetCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(id).await?;
    Ok(Json(cart.into()))
}
