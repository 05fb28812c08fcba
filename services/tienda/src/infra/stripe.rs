use anyhow::Context as _;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::repository::CheckoutGateway;
use crate::domain::types::{CheckoutRequest, CheckoutSession, SessionStatus, WebhookEvent};
use crate::error::TiendaServiceError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Webhook timestamps older than this are rejected (replay protection).
const WEBHOOK_TOLERANCE_SECS: u64 = 300;

type HmacSha256 = Hmac<Sha256>;

/// Stripe-hosted checkout. Holds the secret API key and an HTTP client;
/// cheap to clone, read-only after startup.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    api_key: String,
    webhook_secret: Option<String>,
}

impl StripeGateway {
    pub fn new(api_key: String, webhook_secret: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            webhook_secret,
        }
    }
}

/// Subset of Stripe's checkout-session object we consume.
#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
    url: Option<String>,
    status: Option<String>,
    payment_status: Option<String>,
    amount_total: Option<i64>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: StripeSession,
}

impl CheckoutGateway for StripeGateway {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, TiendaServiceError> {
        // Stripe wants integer minor units.
        let unit_amount = (request.amount * 100.0).round() as i64;

        let mut params: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("success_url".into(), request.success_url.clone()),
            ("cancel_url".into(), request.cancel_url.clone()),
            (
                "line_items[0][price_data][currency]".into(),
                request.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                "Pedido Fundas de Patín".into(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                unit_amount.to_string(),
            ),
            ("line_items[0][quantity]".into(), "1".into()),
        ];
        if let Some(map) = request.metadata.as_object() {
            for (key, value) in map {
                let value = match value.as_str() {
                    Some(s) => s.to_owned(),
                    None => value.to_string(),
                };
                params.push((format!("metadata[{key}]"), value));
            }
        }

        let resp = self
            .client
            .post(format!("{STRIPE_API_BASE}/checkout/sessions"))
            .basic_auth(&self.api_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .context("stripe: create checkout session")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(TiendaServiceError::Internal(anyhow::anyhow!(
                "stripe: create session failed with {status}: {body}"
            )));
        }

        let session: StripeSession = resp
            .json()
            .await
            .context("stripe: decode checkout session")?;
        Ok(CheckoutSession {
            checkout_url: session.url.unwrap_or_default(),
            session_id: session.id,
        })
    }

    async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<SessionStatus, TiendaServiceError> {
        let resp = self
            .client
            .get(format!("{STRIPE_API_BASE}/checkout/sessions/{session_id}"))
            .basic_auth(&self.api_key, None::<&str>)
            .send()
            .await
            .context("stripe: fetch checkout session")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TiendaServiceError::SessionNotFound);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(TiendaServiceError::Internal(anyhow::anyhow!(
                "stripe: fetch session failed with {status}: {body}"
            )));
        }

        let session: StripeSession = resp
            .json()
            .await
            .context("stripe: decode checkout session")?;
        Ok(session_status(&session))
    }

    fn parse_webhook(
        &self,
        body: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, TiendaServiceError> {
        let secret = self
            .webhook_secret
            .as_deref()
            .ok_or(TiendaServiceError::PaymentNotConfigured)?;

        verify_signature(body, signature, secret, now_secs())?;

        let event: StripeEvent =
            serde_json::from_slice(body).map_err(|_| TiendaServiceError::InvalidWebhook)?;
        let session = event.data.object;
        Ok(WebhookEvent {
            event_type: event.event_type,
            session_id: session.id,
            payment_status: session
                .payment_status
                .unwrap_or_else(|| "pending".to_owned()),
        })
    }
}

fn session_status(session: &StripeSession) -> SessionStatus {
    SessionStatus {
        status: session.status.clone().unwrap_or_else(|| "open".to_owned()),
        payment_status: session
            .payment_status
            .clone()
            .unwrap_or_else(|| "pending".to_owned()),
        amount: session.amount_total.unwrap_or(0) as f64 / 100.0,
        currency: session.currency.clone().unwrap_or_default(),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Verify a `Stripe-Signature` header (`t=<ts>,v1=<hex>,...`) against the
/// raw body: HMAC-SHA256 over `"{t}.{body}"` with the endpoint secret,
/// rejecting stale timestamps.
fn verify_signature(
    body: &[u8],
    header: &str,
    secret: &str,
    now: u64,
) -> Result<(), TiendaServiceError> {
    let mut timestamp: Option<u64> = None;
    let mut candidates: Vec<&str> = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = v.parse().ok(),
            Some(("v1", v)) => candidates.push(v),
            _ => {}
        }
    }
    let timestamp = timestamp.ok_or(TiendaServiceError::InvalidWebhook)?;
    if candidates.is_empty() {
        return Err(TiendaServiceError::InvalidWebhook);
    }
    if now.abs_diff(timestamp) > WEBHOOK_TOLERANCE_SECS {
        return Err(TiendaServiceError::InvalidWebhook);
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| TiendaServiceError::Internal(anyhow::anyhow!("webhook hmac: {e}")))?;
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    if candidates.iter().any(|sig| *sig == expected) {
        Ok(())
    } else {
        Err(TiendaServiceError::InvalidWebhook)
    }
}
