use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CartRepository, CheckoutGateway, PaymentTransactionRepository};
use crate::domain::types::{
    CheckoutRequest, CheckoutSession, PaymentTransaction, SessionStatus, WebhookEvent,
};
use crate::error::TiendaServiceError;

/// The store sells in a single currency.
pub const DEFAULT_CURRENCY: &str = "eur";

// ── CreateCheckoutSession ────────────────────────────────────────────────────

pub struct CreateCheckoutInput {
    pub cart_id: Uuid,
    /// Origin of the storefront request; callback URLs are derived from it.
    pub origin: String,
    pub user_id: Option<Uuid>,
}

pub struct CreateCheckoutUseCase<C, P, G>
where
    C: CartRepository,
    P: PaymentTransactionRepository,
    G: CheckoutGateway,
{
    pub carts: C,
    pub transactions: P,
    pub gateway: G,
}

impl<C, P, G> CreateCheckoutUseCase<C, P, G>
where
    C: CartRepository,
    P: PaymentTransactionRepository,
    G: CheckoutGateway,
{
    /// Open a hosted checkout for the cart's total and mirror it locally
    /// as a pending transaction keyed by the provider's session id.
    pub async fn execute(
        &self,
        input: CreateCheckoutInput,
    ) -> Result<CheckoutSession, TiendaServiceError> {
        let cart = self
            .carts
            .find_by_id(input.cart_id)
            .await?
            .ok_or(TiendaServiceError::CartNotFound)?;

        let request = CheckoutRequest {
            amount: cart.total,
            currency: DEFAULT_CURRENCY.to_owned(),
            success_url: format!(
                "{}/pago-exitoso?session_id={{CHECKOUT_SESSION_ID}}",
                input.origin
            ),
            cancel_url: format!("{}/pago-cancelado", input.origin),
            metadata: serde_json::json!({ "cart_id": cart.id }),
        };
        let session = self.gateway.create_session(&request).await?;

        let tx = PaymentTransaction {
            id: Uuid::new_v4(),
            session_id: session.session_id.clone(),
            user_id: input.user_id,
            cart_id: cart.id,
            amount: cart.total,
            currency: DEFAULT_CURRENCY.to_owned(),
            payment_status: "pending".to_owned(),
            metadata: request.metadata,
            created_at: Utc::now(),
        };
        self.transactions.create(&tx).await?;

        Ok(session)
    }
}

// ── GetPaymentStatus ─────────────────────────────────────────────────────────

pub struct GetPaymentStatusUseCase<P: PaymentTransactionRepository, G: CheckoutGateway> {
    pub transactions: P,
    pub gateway: G,
}

impl<P: PaymentTransactionRepository, G: CheckoutGateway> GetPaymentStatusUseCase<P, G> {
    /// Poll the provider and mirror the result into the local row.
    /// A provider failure propagates and leaves the row untouched;
    /// re-polling an unchanged session is idempotent.
    pub async fn execute(&self, session_id: &str) -> Result<SessionStatus, TiendaServiceError> {
        let status = self.gateway.fetch_session(session_id).await?;
        self.transactions
            .update_status(session_id, &status.payment_status)
            .await?;
        Ok(status)
    }
}

// ── ApplyWebhook ─────────────────────────────────────────────────────────────

pub struct ApplyWebhookUseCase<P: PaymentTransactionRepository> {
    pub transactions: P,
}

impl<P: PaymentTransactionRepository> ApplyWebhookUseCase<P> {
    /// Overwrite the stored status for the event's session. Redeliveries
    /// of the same event re-overwrite with the same value, which is safe.
    pub async fn execute(&self, event: &WebhookEvent) -> Result<(), TiendaServiceError> {
        self.transactions
            .update_status(&event.session_id, &event.payment_status)
            .await?;
        Ok(())
    }
}
