use chrono::Utc;
use uuid::Uuid;

use fundas_domain::order::OrderStatus;

use crate::domain::repository::{CartRepository, OrderRepository};
use crate::domain::types::{CustomerDetails, Order, User};
use crate::error::TiendaServiceError;

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CreateOrderInput {
    pub cart_id: Uuid,
    pub customer: Option<CustomerDetails>,
    pub payment_method: String,
    pub user_id: Option<Uuid>,
}

pub struct CreateOrderUseCase<O: OrderRepository, C: CartRepository> {
    pub orders: O,
    pub carts: C,
}

impl<O: OrderRepository, C: CartRepository> CreateOrderUseCase<O, C> {
    /// The order total is the cart's total, copied verbatim at this
    /// moment; later catalog changes never touch it.
    pub async fn execute(&self, input: CreateOrderInput) -> Result<Order, TiendaServiceError> {
        let cart = self
            .carts
            .find_by_id(input.cart_id)
            .await?
            .ok_or(TiendaServiceError::CartNotFound)?;

        let order = Order {
            id: Uuid::new_v4(),
            cart_id: cart.id,
            user_id: input.user_id,
            customer: input.customer,
            payment_method: input.payment_method,
            total: cart.total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        self.orders.create(&order).await?;
        Ok(order)
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    /// Admins see every order; customers only their own.
    pub async fn execute(&self, acting: &User) -> Result<Vec<Order>, TiendaServiceError> {
        if acting.role.is_admin() {
            self.orders.list_all().await
        } else {
            self.orders.list_by_user(acting.id).await
        }
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetOrderUseCase<O> {
    pub async fn execute(&self, acting: &User, id: Uuid) -> Result<Order, TiendaServiceError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(TiendaServiceError::OrderNotFound)?;
        if !acting.role.is_admin() && order.user_id != Some(acting.id) {
            return Err(TiendaServiceError::Forbidden);
        }
        Ok(order)
    }
}
