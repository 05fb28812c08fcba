use serde::Deserialize;

use fundas_core::config::Config;

/// Store service configuration loaded from environment variables.
///
/// Stripe keys are optional: without them the service runs fine but the
/// payment endpoints answer 503.
#[derive(Debug, Deserialize)]
pub struct TiendaConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3001). Env var: `TIENDA_PORT`.
    #[serde(default = "default_port")]
    pub tienda_port: u16,
    /// Process-wide HS256 signing secret. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Stripe secret API key (`sk_...`). Env var: `STRIPE_API_KEY`.
    pub stripe_api_key: Option<String>,
    /// Stripe webhook endpoint secret (`whsec_...`). Env var: `STRIPE_WEBHOOK_SECRET`.
    pub stripe_webhook_secret: Option<String>,
    /// Comma-separated allowed CORS origins; unset means allow any. Env var: `CORS_ORIGINS`.
    pub cors_origins: Option<String>,
}

impl Config for TiendaConfig {}

fn default_port() -> u16 {
    3001
}
