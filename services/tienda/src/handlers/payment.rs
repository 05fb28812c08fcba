use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, header},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::CheckoutGateway as _;
use crate::error::TiendaServiceError;
use crate::handlers::{BearerHeader, optional_user};
use crate::state::AppState;
use crate::usecase::payment::{
    ApplyWebhookUseCase, CreateCheckoutInput, CreateCheckoutUseCase, GetPaymentStatusUseCase,
};

/// Callback URLs are built from the storefront's own origin so the
/// provider redirects back to wherever the request came from.
fn request_origin(headers: &HeaderMap) -> String {
    if let Some(origin) = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok()) {
        if origin != "null" {
            return origin.trim_end_matches('/').to_owned();
        }
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("https://{host}")
}

// ── POST /pagos/checkout ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCheckoutRequest {
    #[serde(rename = "carrito_id")]
    pub cart_id: Uuid,
}

#[derive(Serialize)]
pub struct CreateCheckoutResponse {
    pub checkout_url: String,
    pub session_id: String,
}

pub async fn create_checkout(
    State(state): State<AppState>,
    bearer: BearerHeader,
    headers: HeaderMap,
    Json(body): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, TiendaServiceError> {
    let gateway = state.checkout_gateway()?;
    let user_id = optional_user(&state, &bearer).await.map(|user| user.id);

    let usecase = CreateCheckoutUseCase {
        carts: state.cart_repo(),
        transactions: state.payment_repo(),
        gateway,
    };
    let session = usecase
        .execute(CreateCheckoutInput {
            cart_id: body.cart_id,
            origin: request_origin(&headers),
            user_id,
        })
        .await?;
    Ok(Json(CreateCheckoutResponse {
        checkout_url: session.checkout_url,
        session_id: session.session_id,
    }))
}

// ── GET /pagos/status/{session_id} ───────────────────────────────────────────

#[derive(Serialize)]
pub struct PaymentStatusResponse {
    pub status: String,
    pub payment_status: String,
    pub amount: f64,
    pub currency: String,
}

pub async fn get_payment_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PaymentStatusResponse>, TiendaServiceError> {
    let gateway = state.checkout_gateway()?;

    let usecase = GetPaymentStatusUseCase {
        transactions: state.payment_repo(),
        gateway,
    };
    let status = usecase.execute(&session_id).await?;
    Ok(Json(PaymentStatusResponse {
        status: status.status,
        payment_status: status.payment_status,
        amount: status.amount,
        currency: status.currency,
    }))
}

// ── POST /webhook/stripe ─────────────────────────────────────────────────────

pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, TiendaServiceError> {
    let gateway = state.checkout_gateway()?;
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(TiendaServiceError::InvalidWebhook)?;

    let event = gateway.parse_webhook(&body, signature)?;

    let usecase = ApplyWebhookUseCase {
        transactions: state.payment_repo(),
    };
    usecase.execute(&event).await?;
    Ok(Json(serde_json::json!({ "received": true })))
}
