use sea_orm::Database;
use tracing::{info, warn};

use fundas_core::config::Config as _;
use tienda::config::TiendaConfig;
use tienda::infra::stripe::StripeGateway;
use tienda::router::build_router;
use tienda::state::AppState;
use tienda::usecase::auth::EnsureAdminUseCase;

#[tokio::main]
async fn main() {
    fundas_core::tracing::init_tracing();

    let config = TiendaConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let stripe = config
        .stripe_api_key
        .clone()
        .map(|key| StripeGateway::new(key, config.stripe_webhook_secret.clone()));
    if stripe.is_none() {
        warn!("STRIPE_API_KEY not set; payment endpoints will answer 503");
    }

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        stripe,
    };

    // Operational seeding: make sure the reserved admin account exists.
    let seeded = EnsureAdminUseCase {
        repo: state.user_repo(),
    }
    .execute()
    .await
    .expect("failed to seed admin account");
    if seeded {
        info!("seeded default admin account");
    }

    let router = build_router(state, config.cors_origins.as_deref());
    let addr = format!("0.0.0.0:{}", config.tienda_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("tienda service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
