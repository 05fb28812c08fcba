use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use fundas_domain::order::OrderStatus;
use fundas_domain::product::ProductCategory;
use fundas_domain::user::UserRole;

use tienda::domain::repository::{
    CartRepository, CheckoutGateway, OrderRepository, PaymentTransactionRepository,
    ProductRepository, UserRepository,
};
use tienda::domain::types::{
    Cart, CartItem, CheckoutRequest, CheckoutSession, Order, PaymentTransaction, Product,
    ProductFields, SessionStatus, User, WebhookEvent,
};
use tienda::error::TiendaServiceError;
use tienda::usecase::auth::hash_password;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration-tests";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the stored users for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, TiendaServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TiendaServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), TiendaServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, TiendaServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count_active(&self) -> Result<u64, TiendaServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.is_active)
            .count() as u64)
    }
}

// ── MockProductRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockProductRepo {
    pub products: Arc<Mutex<Vec<Product>>>,
}

impl MockProductRepo {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl ProductRepository for MockProductRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, TiendaServiceError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_active(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, TiendaServiceError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }

    async fn create(&self, product: &Product) -> Result<(), TiendaServiceError> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn replace(
        &self,
        id: Uuid,
        fields: &ProductFields,
    ) -> Result<bool, TiendaServiceError> {
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        product.name = fields.name.clone();
        product.description = fields.description.clone();
        product.price = fields.price;
        product.category = fields.category;
        product.sizes = fields.sizes.clone();
        product.colors = fields.colors.clone();
        product.material = fields.material.clone();
        product.stock = fields.stock;
        product.image_url = fields.image_url.clone();
        product.features = fields.features.clone();
        Ok(true)
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, TiendaServiceError> {
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        product.is_active = false;
        Ok(true)
    }

    async fn count_active(&self) -> Result<u64, TiendaServiceError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active)
            .count() as u64)
    }
}

// ── MockCartRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockCartRepo {
    pub carts: Arc<Mutex<Vec<Cart>>>,
}

impl MockCartRepo {
    pub fn new(carts: Vec<Cart>) -> Self {
        Self {
            carts: Arc::new(Mutex::new(carts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl CartRepository for MockCartRepo {
    async fn create(&self, cart: &Cart) -> Result<(), TiendaServiceError> {
        self.carts.lock().unwrap().push(cart.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, TiendaServiceError> {
        Ok(self.carts.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
}

impl MockOrderRepo {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn orders_handle(&self) -> Arc<Mutex<Vec<Order>>> {
        Arc::clone(&self.orders)
    }
}

impl OrderRepository for MockOrderRepo {
    async fn create(&self, order: &Order) -> Result<(), TiendaServiceError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, TiendaServiceError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Order>, TiendaServiceError> {
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, TiendaServiceError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, TiendaServiceError> {
        Ok(self.orders.lock().unwrap().len() as u64)
    }

    async fn sum_totals_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<f64, TiendaServiceError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.created_at >= cutoff)
            .map(|o| o.total)
            .sum())
    }
}

// ── MockPaymentRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockPaymentRepo {
    pub transactions: Arc<Mutex<Vec<PaymentTransaction>>>,
}

impl MockPaymentRepo {
    pub fn new(transactions: Vec<PaymentTransaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn transactions_handle(&self) -> Arc<Mutex<Vec<PaymentTransaction>>> {
        Arc::clone(&self.transactions)
    }
}

impl PaymentTransactionRepository for MockPaymentRepo {
    async fn create(&self, tx: &PaymentTransaction) -> Result<(), TiendaServiceError> {
        self.transactions.lock().unwrap().push(tx.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        session_id: &str,
        payment_status: &str,
    ) -> Result<bool, TiendaServiceError> {
        let mut transactions = self.transactions.lock().unwrap();
        let Some(tx) = transactions.iter_mut().find(|t| t.session_id == session_id) else {
            return Ok(false);
        };
        tx.payment_status = payment_status.to_owned();
        Ok(true)
    }
}

// ── MockCheckoutGateway ──────────────────────────────────────────────────────

/// In-memory stand-in for the hosted-checkout provider. `create_session`
/// registers an open session; `fetch_session` serves whatever status the
/// test planted (or was registered).
#[derive(Clone)]
pub struct MockCheckoutGateway {
    pub sessions: Arc<Mutex<HashMap<String, SessionStatus>>>,
    pub counter: Arc<Mutex<u32>>,
}

impl MockCheckoutGateway {
    pub fn empty() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            counter: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_session(session_id: &str, status: SessionStatus) -> Self {
        let gateway = Self::empty();
        gateway
            .sessions
            .lock()
            .unwrap()
            .insert(session_id.to_owned(), status);
        gateway
    }
}

impl CheckoutGateway for MockCheckoutGateway {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, TiendaServiceError> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        let session_id = format!("cs_test_{counter}");
        self.sessions.lock().unwrap().insert(
            session_id.clone(),
            SessionStatus {
                status: "open".to_owned(),
                payment_status: "unpaid".to_owned(),
                amount: request.amount,
                currency: request.currency.clone(),
            },
        );
        Ok(CheckoutSession {
            checkout_url: format!("https://checkout.stripe.test/pay/{session_id}"),
            session_id,
        })
    }

    async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<SessionStatus, TiendaServiceError> {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or(TiendaServiceError::SessionNotFound)
    }

    fn parse_webhook(
        &self,
        body: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, TiendaServiceError> {
        serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                Some(WebhookEvent {
                    event_type: v["type"].as_str()?.to_owned(),
                    session_id: v["data"]["object"]["id"].as_str()?.to_owned(),
                    payment_status: v["data"]["object"]["payment_status"]
                        .as_str()
                        .unwrap_or("pending")
                        .to_owned(),
                })
            })
            .ok_or(TiendaServiceError::InvalidWebhook)
    }
}

// ── Builders ─────────────────────────────────────────────────────────────────

pub fn test_user(email: &str, password: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Alicia Prueba".to_owned(),
        email: email.to_owned(),
        password_hash: hash_password(password).unwrap(),
        phone: Some("123456789".to_owned()),
        address: Some("Calle Mayor 1".to_owned()),
        city: Some("Madrid".to_owned()),
        postal_code: Some("28001".to_owned()),
        role: UserRole::Customer,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn test_admin() -> User {
    User {
        role: UserRole::Admin,
        ..test_user("admin@example.com", "admin-secreta")
    }
}

pub fn test_product(price: f64, category: ProductCategory) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: "Funda Test Artística Premium".to_owned(),
        description: "Funda de prueba con materiales premium".to_owned(),
        price,
        category,
        sizes: vec!["S".into(), "M".into(), "L".into(), "XL".into()],
        colors: vec!["Negro".into(), "Rosa".into(), "Azul".into()],
        material: "Neopreno premium".to_owned(),
        stock: 50,
        image_url: None,
        features: vec!["Resistente al agua".into(), "Acolchado interno".into()],
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn test_cart(total: f64, user_id: Option<Uuid>) -> Cart {
    Cart {
        id: Uuid::new_v4(),
        user_id,
        items: vec![],
        total,
        created_at: Utc::now(),
    }
}

pub fn test_cart_item(product_id: Uuid, quantity: u32) -> CartItem {
    CartItem {
        product_id,
        quantity,
        size: "M".to_owned(),
        color: "Negro".to_owned(),
    }
}

pub fn test_order(total: f64, user_id: Option<Uuid>) -> Order {
    Order {
        id: Uuid::new_v4(),
        cart_id: Uuid::new_v4(),
        user_id,
        customer: None,
        payment_method: "stripe".to_owned(),
        total,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    }
}

pub fn test_transaction(session_id: &str, amount: f64) -> PaymentTransaction {
    PaymentTransaction {
        id: Uuid::new_v4(),
        session_id: session_id.to_owned(),
        user_id: None,
        cart_id: Uuid::new_v4(),
        amount,
        currency: "eur".to_owned(),
        payment_status: "pending".to_owned(),
        metadata: serde_json::json!({}),
        created_at: Utc::now(),
    }
}
