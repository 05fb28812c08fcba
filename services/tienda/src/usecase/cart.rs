use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CartRepository, ProductRepository};
use crate::domain::types::{Cart, CartItem};
use crate::error::TiendaServiceError;

// ── CreateCart ───────────────────────────────────────────────────────────────

pub struct CreateCartInput {
    pub items: Vec<CartItem>,
    pub user_id: Option<Uuid>,
}

pub struct CreateCartUseCase<C: CartRepository, P: ProductRepository> {
    pub carts: C,
    pub products: P,
}

impl<C: CartRepository, P: ProductRepository> CreateCartUseCase<C, P> {
    /// Compute the total from catalog prices current at this moment.
    /// Items whose product id does not resolve contribute zero and are
    /// stored anyway; the total is never recomputed afterwards.
    pub async fn execute(&self, input: CreateCartInput) -> Result<Cart, TiendaServiceError> {
        let mut total = 0.0;
        for item in &input.items {
            if let Some(product) = self.products.find_by_id(item.product_id).await? {
                total += product.price * f64::from(item.quantity);
            }
        }

        let cart = Cart {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            items: input.items,
            total,
            created_at: Utc::now(),
        };
        self.carts.create(&cart).await?;
        Ok(cart)
    }
}

// ── GetCart ──────────────────────────────────────────────────────────────────

pub struct GetCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> GetCartUseCase<C> {
    pub async fn execute(&self, id: Uuid) -> Result<Cart, TiendaServiceError> {
        self.carts
            .find_by_id(id)
            .await?
            .ok_or(TiendaServiceError::CartNotFound)
    }
}
