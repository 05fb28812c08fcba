use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fundas_domain::order::OrderStatus;

use crate::domain::types::{CustomerDetails, Order};
use crate::error::TiendaServiceError;
use crate::handlers::{BearerHeader, optional_user, require_user};
use crate::state::AppState;
use crate::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
};

// ── DTOs ─────────────────────────────────────────────────────────────────────

#[derive(Deserialize, Serialize)]
pub struct CustomerDetailsBody {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "codigo_postal")]
    pub postal_code: String,
}

impl From<CustomerDetailsBody> for CustomerDetails {
    fn from(body: CustomerDetailsBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
            address: body.address,
            city: body.city,
            postal_code: body.postal_code,
        }
    }
}

impl From<CustomerDetails> for CustomerDetailsBody {
    fn from(details: CustomerDetails) -> Self {
        Self {
            name: details.name,
            email: details.email,
            phone: details.phone,
            address: details.address,
            city: details.city,
            postal_code: details.postal_code,
        }
    }
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    #[serde(rename = "carrito_id")]
    pub cart_id: String,
    #[serde(rename = "usuario_id")]
    pub user_id: Option<String>,
    #[serde(rename = "datos_cliente")]
    pub customer: Option<CustomerDetailsBody>,
    #[serde(rename = "metodo_pago")]
    pub payment_method: String,
    pub total: f64,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(
        rename = "fecha_pedido",
        serialize_with = "fundas_core::serde::to_rfc3339_ms"
    )]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            cart_id: order.cart_id.to_string(),
            user_id: order.user_id.map(|id| id.to_string()),
            customer: order.customer.map(Into::into),
            payment_method: order.payment_method,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

// ── POST /pedidos ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "carrito_id")]
    pub cart_id: Uuid,
    #[serde(rename = "datos_cliente")]
    pub customer: Option<CustomerDetailsBody>,
    #[serde(rename = "metodo_pago")]
    pub payment_method: String,
}

pub async fn create_order(
    State(state): State<AppState>,
    bearer: BearerHeader,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, TiendaServiceError> {
    let user_id = optional_user(&state, &bearer).await.map(|user| user.id);

    let usecase = CreateOrderUseCase {
        orders: state.order_repo(),
        carts: state.cart_repo(),
    };
    let order = usecase
        .execute(CreateOrderInput {
            cart_id: body.cart_id,
            customer: body.customer.map(Into::into),
            payment_method: body.payment_method,
            user_id,
        })
        .await?;
    Ok(Json(order.into()))
}

// ── GET /pedidos ─────────────────────────────────────────────────────────────

pub async fn list_orders(
    State(state): State<AppState>,
    bearer: BearerHeader,
) -> Result<Json<Vec<OrderResponse>>, TiendaServiceError> {
    let user = require_user(&state, &bearer).await?;

    let usecase = ListOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute(&user).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── GET /pedidos/{id} ────────────────────────────────────────────────────────

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    bearer: BearerHeader,
) -> Result<Json<OrderResponse>, TiendaServiceError> {
    let user = require_user(&state, &bearer).await?;

    let usecase = GetOrderUseCase {
        orders: state.order_repo(),
    };
    let order = usecase.execute(&user, id).await?;
    Ok(Json(order.into()))
}
