use chrono::{DateTime, Utc};
use uuid::Uuid;

use fundas_domain::order::OrderStatus;
use fundas_domain::product::ProductCategory;
use fundas_domain::user::UserRole;

/// Registered account. `password_hash` never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Catalog entry for a boot cover.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub material: String,
    pub stock: i32,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied product fields, used for both create and full-record
/// replace. Identity, active flag and creation timestamp are never
/// client-controlled.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub material: String,
    pub stock: i32,
    pub image_url: Option<String>,
    pub features: Vec<String>,
}

/// One cart line. Size and color are free-form; they are not checked
/// against the product's available lists.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: u32,
    pub size: String,
    pub color: String,
}

/// Snapshot of chosen items with a total fixed at creation time.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Shipping/contact details attached to an order.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Durable order derived from a cart.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub user_id: Option<Uuid>,
    pub customer: Option<CustomerDetails>,
    pub payment_method: String,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Local mirror of a provider checkout session.
#[derive(Debug, Clone)]
pub struct PaymentTransaction {
    pub id: Uuid,
    pub session_id: String,
    pub user_id: Option<Uuid>,
    pub cart_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub payment_status: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

// ── Checkout provider wire types ─────────────────────────────────────────────

/// What we ask the provider to open a hosted checkout for.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub amount: f64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: serde_json::Value,
}

/// Provider-issued session handle returned to the storefront.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub session_id: String,
    pub checkout_url: String,
}

/// Point-in-time provider view of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub status: String,
    pub payment_status: String,
    pub amount: f64,
    pub currency: String,
}

/// Decoded, signature-verified webhook notification.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub event_type: String,
    pub session_id: String,
    pub payment_status: String,
}
