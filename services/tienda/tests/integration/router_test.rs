//! Router-level smoke tests for routes that never touch the database.
//! Everything data-bound is exercised at the usecase layer with mock
//! repositories; here we pin status codes, the /api prefix, and the
//! static wire payloads.

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;

use tienda::router::build_router;
use tienda::state::AppState;

fn test_server() -> TestServer {
    // Disconnected handle: fine for routes that fail before any query.
    let state = AppState {
        db: DatabaseConnection::default(),
        jwt_secret: "router-test-secret".to_owned(),
        stripe: None,
    };
    TestServer::new(build_router(state, None)).unwrap()
}

#[tokio::test]
async fn should_answer_health_probes() {
    let server = test_server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_serve_banner_under_api_prefix() {
    let server = test_server();
    let response = server.get("/api/").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "API Tienda de Fundas de Patines");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn should_serve_static_category_list() {
    let server = test_server();
    let response = server.get("/api/categorias").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let categorias = body["categorias"].as_array().unwrap();
    assert_eq!(categorias.len(), 4);

    let values: Vec<&str> = categorias
        .iter()
        .map(|c| c["value"].as_str().unwrap())
        .collect();
    assert_eq!(
        values,
        ["artisticos", "hockey", "velocidad", "recreativos"]
    );
    assert_eq!(categorias[0]["label"], "Patines Artísticos");
}

#[tokio::test]
async fn should_require_bearer_on_protected_routes() {
    let server = test_server();
    let me = server.get("/api/auth/me").await;
    me.assert_status(StatusCode::UNAUTHORIZED);

    let orders = server.get("/api/pedidos").await;
    orders.assert_status(StatusCode::UNAUTHORIZED);

    let stats = server.get("/api/admin/estadisticas").await;
    stats.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = me.json();
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_answer_503_when_payment_provider_unconfigured() {
    let server = test_server();

    let checkout = server
        .post("/api/pagos/checkout")
        .json(&serde_json::json!({ "carrito_id": uuid::Uuid::new_v4() }))
        .await;
    checkout.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = checkout.json();
    assert_eq!(body["kind"], "PAYMENT_NOT_CONFIGURED");

    let status = server.get("/api/pagos/status/cs_test_1").await;
    status.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let webhook = server.post("/api/webhook/stripe").text("{}").await;
    webhook.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_not_serve_store_routes_outside_api_prefix() {
    let server = test_server();
    let response = server.get("/productos").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
