#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use fundas_domain::product::ProductCategory;

use crate::domain::types::{
    Cart, CheckoutRequest, CheckoutSession, Order, PaymentTransaction, Product, ProductFields,
    SessionStatus, User, WebhookEvent,
};
use crate::error::TiendaServiceError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, TiendaServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TiendaServiceError>;
    async fn create(&self, user: &User) -> Result<(), TiendaServiceError>;
    async fn list(&self) -> Result<Vec<User>, TiendaServiceError>;
    async fn count_active(&self) -> Result<u64, TiendaServiceError>;
}

/// Repository for catalog products.
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, TiendaServiceError>;

    /// Active products only, optionally restricted to one category,
    /// in insertion order.
    async fn list_active(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, TiendaServiceError>;

    async fn create(&self, product: &Product) -> Result<(), TiendaServiceError>;

    /// Full-record replace of the client-controlled fields.
    /// Returns `false` if no row has that id.
    async fn replace(&self, id: Uuid, fields: &ProductFields)
    -> Result<bool, TiendaServiceError>;

    /// Soft delete. Returns `false` if no row has that id.
    async fn deactivate(&self, id: Uuid) -> Result<bool, TiendaServiceError>;

    async fn count_active(&self) -> Result<u64, TiendaServiceError>;
}

/// Repository for carts and their embedded items.
pub trait CartRepository: Send + Sync {
    /// Persist the cart header and all items atomically.
    async fn create(&self, cart: &Cart) -> Result<(), TiendaServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, TiendaServiceError>;
}

/// Repository for orders.
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order) -> Result<(), TiendaServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, TiendaServiceError>;
    async fn list_all(&self) -> Result<Vec<Order>, TiendaServiceError>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, TiendaServiceError>;
    async fn count(&self) -> Result<u64, TiendaServiceError>;

    /// Sum of order totals placed at or after `cutoff`; 0 when none.
    async fn sum_totals_since(&self, cutoff: DateTime<Utc>) -> Result<f64, TiendaServiceError>;
}

/// Repository for provider-session mirror rows. The service only ever
/// writes these; status reads go to the provider.
pub trait PaymentTransactionRepository: Send + Sync {
    async fn create(&self, tx: &PaymentTransaction) -> Result<(), TiendaServiceError>;

    /// Overwrite the stored payment status. Returns `false` if no row
    /// carries that session id.
    async fn update_status(
        &self,
        session_id: &str,
        payment_status: &str,
    ) -> Result<bool, TiendaServiceError>;
}

/// Port for the external hosted-checkout provider.
pub trait CheckoutGateway: Send + Sync {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, TiendaServiceError>;

    async fn fetch_session(&self, session_id: &str)
    -> Result<SessionStatus, TiendaServiceError>;

    /// Verify the provider signature over the raw body and decode the event.
    fn parse_webhook(
        &self,
        body: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, TiendaServiceError>;
}
