use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fundas_core::health::{healthz, readyz};
use fundas_core::middleware::request_id_layer;

use crate::handlers::root;
use crate::handlers::{
    admin::{get_statistics, list_users},
    auth::{get_me, login, register},
    cart::{create_cart, get_cart},
    order::{create_order, get_order, list_orders},
    payment::{create_checkout, get_payment_status, stripe_webhook},
    product::{
        create_product, delete_product, get_product, list_categories, list_products,
        update_product,
    },
};
use crate::state::AppState;

fn cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        None => CorsLayer::permissive(),
        Some(raw) => {
            let origins: Vec<HeaderValue> = raw
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

pub fn build_router(state: AppState, cors_origins: Option<&str>) -> Router {
    let api = Router::new()
        // Banner
        .route("/", get(root))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
        // Catalog
        .route("/productos", post(create_product))
        .route("/productos", get(list_products))
        .route("/productos/{id}", get(get_product))
        .route("/productos/{id}", put(update_product))
        .route("/productos/{id}", delete(delete_product))
        .route("/categorias", get(list_categories))
        // Carts
        .route("/carrito", post(create_cart))
        .route("/carrito/{id}", get(get_cart))
        // Orders
        .route("/pedidos", post(create_order))
        .route("/pedidos", get(list_orders))
        .route("/pedidos/{id}", get(get_order))
        // Payments
        .route("/pagos/checkout", post(create_checkout))
        .route("/pagos/status/{session_id}", get(get_payment_status))
        .route("/webhook/stripe", post(stripe_webhook))
        // Administration
        .route("/admin/usuarios", get(list_users))
        .route("/admin/estadisticas", get(get_statistics));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
