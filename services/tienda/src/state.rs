use sea_orm::DatabaseConnection;

use crate::error::TiendaServiceError;
use crate::infra::db::{
    DbCartRepository, DbOrderRepository, DbPaymentTransactionRepository, DbProductRepository,
    DbUserRepository,
};
use crate::infra::stripe::StripeGateway;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    /// `None` when no Stripe API key was configured; payment endpoints
    /// then answer 503.
    pub stripe: Option<StripeGateway>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn cart_repo(&self) -> DbCartRepository {
        DbCartRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn payment_repo(&self) -> DbPaymentTransactionRepository {
        DbPaymentTransactionRepository {
            db: self.db.clone(),
        }
    }

    pub fn checkout_gateway(&self) -> Result<StripeGateway, TiendaServiceError> {
        self.stripe
            .clone()
            .ok_or(TiendaServiceError::PaymentNotConfigured)
    }
}
