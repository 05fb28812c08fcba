use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use fundas_domain::order::OrderStatus;
use fundas_domain::product::ProductCategory;
use fundas_domain::user::UserRole;
use tienda_schema::{cart_items, carts, orders, payment_transactions, products, users};

use crate::domain::repository::{
    CartRepository, OrderRepository, PaymentTransactionRepository, ProductRepository,
    UserRepository,
};
use crate::domain::types::{
    Cart, CartItem, CustomerDetails, Order, PaymentTransaction, Product, ProductFields, User,
};
use crate::error::TiendaServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, TiendaServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TiendaServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), TiendaServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            phone: Set(user.phone.clone()),
            address: Set(user.address.clone()),
            city: Set(user.city.clone()),
            postal_code: Set(user.postal_code.clone()),
            role: Set(user.role.as_u8() as i16),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, TiendaServiceError> {
        let models = users::Entity::find()
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn count_active(&self) -> Result<u64, TiendaServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .context("count active users")?;
        Ok(count)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        phone: model.phone,
        address: model.address,
        city: model.city,
        postal_code: model.postal_code,
        role: UserRole::from_u8(model.role as u8).unwrap_or(UserRole::Customer),
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, TiendaServiceError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        model.map(product_from_model).transpose()
    }

    async fn list_active(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, TiendaServiceError> {
        let mut query = products::Entity::find().filter(products::Column::IsActive.eq(true));
        if let Some(category) = category {
            query = query.filter(products::Column::Category.eq(category.as_str()));
        }
        let models = query.all(&self.db).await.context("list active products")?;
        models.into_iter().map(product_from_model).collect()
    }

    async fn create(&self, product: &Product) -> Result<(), TiendaServiceError> {
        products::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            category: Set(product.category.as_str().to_owned()),
            sizes: Set(product.sizes.clone()),
            colors: Set(product.colors.clone()),
            material: Set(product.material.clone()),
            stock: Set(product.stock),
            image_url: Set(product.image_url.clone()),
            features: Set(product.features.clone()),
            is_active: Set(product.is_active),
            created_at: Set(product.created_at),
        }
        .insert(&self.db)
        .await
        .context("create product")?;
        Ok(())
    }

    async fn replace(
        &self,
        id: Uuid,
        fields: &ProductFields,
    ) -> Result<bool, TiendaServiceError> {
        let result = products::Entity::update_many()
            .filter(products::Column::Id.eq(id))
            .col_expr(products::Column::Name, Expr::value(fields.name.clone()))
            .col_expr(
                products::Column::Description,
                Expr::value(fields.description.clone()),
            )
            .col_expr(products::Column::Price, Expr::value(fields.price))
            .col_expr(
                products::Column::Category,
                Expr::value(fields.category.as_str()),
            )
            .col_expr(products::Column::Sizes, Expr::value(fields.sizes.clone()))
            .col_expr(products::Column::Colors, Expr::value(fields.colors.clone()))
            .col_expr(
                products::Column::Material,
                Expr::value(fields.material.clone()),
            )
            .col_expr(products::Column::Stock, Expr::value(fields.stock))
            .col_expr(
                products::Column::ImageUrl,
                Expr::value(fields.image_url.clone()),
            )
            .col_expr(
                products::Column::Features,
                Expr::value(fields.features.clone()),
            )
            .exec(&self.db)
            .await
            .context("replace product")?;
        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, TiendaServiceError> {
        let result = products::Entity::update_many()
            .filter(products::Column::Id.eq(id))
            .col_expr(products::Column::IsActive, Expr::value(false))
            .exec(&self.db)
            .await
            .context("deactivate product")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_active(&self) -> Result<u64, TiendaServiceError> {
        let count = products::Entity::find()
            .filter(products::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .context("count active products")?;
        Ok(count)
    }
}

fn product_from_model(model: products::Model) -> Result<Product, TiendaServiceError> {
    let category = ProductCategory::from_str(&model.category).ok_or_else(|| {
        TiendaServiceError::Internal(anyhow::anyhow!(
            "product {} has unknown category {:?}",
            model.id,
            model.category
        ))
    })?;
    Ok(Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        category,
        sizes: model.sizes,
        colors: model.colors,
        material: model.material,
        stock: model.stock,
        image_url: model.image_url,
        features: model.features,
        is_active: model.is_active,
        created_at: model.created_at,
    })
}

// ── Cart repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCartRepository {
    pub db: DatabaseConnection,
}

impl CartRepository for DbCartRepository {
    async fn create(&self, cart: &Cart) -> Result<(), TiendaServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let cart = cart.clone();
                Box::pin(async move {
                    carts::ActiveModel {
                        id: Set(cart.id),
                        user_id: Set(cart.user_id),
                        total: Set(cart.total),
                        created_at: Set(cart.created_at),
                    }
                    .insert(txn)
                    .await?;

                    for item in &cart.items {
                        cart_items::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            cart_id: Set(cart.id),
                            product_id: Set(item.product_id),
                            quantity: Set(item.quantity as i32),
                            size: Set(item.size.clone()),
                            color: Set(item.color.clone()),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create cart")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, TiendaServiceError> {
        let Some(model) = carts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find cart by id")?
        else {
            return Ok(None);
        };

        let items = cart_items::Entity::find()
            .filter(cart_items::Column::CartId.eq(id))
            .all(&self.db)
            .await
            .context("list cart items")?;

        Ok(Some(Cart {
            id: model.id,
            user_id: model.user_id,
            items: items
                .into_iter()
                .map(|item| CartItem {
                    product_id: item.product_id,
                    quantity: item.quantity as u32,
                    size: item.size,
                    color: item.color,
                })
                .collect(),
            total: model.total,
            created_at: model.created_at,
        }))
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), TiendaServiceError> {
        let customer = order.customer.as_ref();
        orders::ActiveModel {
            id: Set(order.id),
            cart_id: Set(order.cart_id),
            user_id: Set(order.user_id),
            customer_name: Set(customer.map(|c| c.name.clone())),
            customer_email: Set(customer.map(|c| c.email.clone())),
            customer_phone: Set(customer.map(|c| c.phone.clone())),
            customer_address: Set(customer.map(|c| c.address.clone())),
            customer_city: Set(customer.map(|c| c.city.clone())),
            customer_postal_code: Set(customer.map(|c| c.postal_code.clone())),
            payment_method: Set(order.payment_method.clone()),
            total: Set(order.total),
            status: Set(order.status.as_str().to_owned()),
            created_at: Set(order.created_at),
        }
        .insert(&self.db)
        .await
        .context("create order")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, TiendaServiceError> {
        let model = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order by id")?;
        Ok(model.map(order_from_model))
    }

    async fn list_all(&self) -> Result<Vec<Order>, TiendaServiceError> {
        let models = orders::Entity::find()
            .all(&self.db)
            .await
            .context("list orders")?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, TiendaServiceError> {
        let models = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list orders by user")?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    async fn count(&self) -> Result<u64, TiendaServiceError> {
        let count = orders::Entity::find()
            .count(&self.db)
            .await
            .context("count orders")?;
        Ok(count)
    }

    async fn sum_totals_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<f64, TiendaServiceError> {
        let sum: Option<Option<f64>> = orders::Entity::find()
            .select_only()
            .column_as(Expr::col(orders::Column::Total).sum(), "total_sum")
            .filter(orders::Column::CreatedAt.gte(cutoff))
            .into_tuple()
            .one(&self.db)
            .await
            .context("sum order totals")?;
        Ok(sum.flatten().unwrap_or(0.0))
    }
}

fn order_from_model(model: orders::Model) -> Order {
    let customer = model.customer_name.map(|name| CustomerDetails {
        name,
        email: model.customer_email.unwrap_or_default(),
        phone: model.customer_phone.unwrap_or_default(),
        address: model.customer_address.unwrap_or_default(),
        city: model.customer_city.unwrap_or_default(),
        postal_code: model.customer_postal_code.unwrap_or_default(),
    });
    Order {
        id: model.id,
        cart_id: model.cart_id,
        user_id: model.user_id,
        customer,
        payment_method: model.payment_method,
        total: model.total,
        status: OrderStatus::from_str(&model.status).unwrap_or(OrderStatus::Pending),
        created_at: model.created_at,
    }
}

// ── Payment transaction repository ───────────────────────────────────────────

#[derive(Clone)]
pub struct DbPaymentTransactionRepository {
    pub db: DatabaseConnection,
}

impl PaymentTransactionRepository for DbPaymentTransactionRepository {
    async fn create(&self, tx: &PaymentTransaction) -> Result<(), TiendaServiceError> {
        payment_transactions::ActiveModel {
            id: Set(tx.id),
            session_id: Set(tx.session_id.clone()),
            user_id: Set(tx.user_id),
            cart_id: Set(tx.cart_id),
            amount: Set(tx.amount),
            currency: Set(tx.currency.clone()),
            payment_status: Set(tx.payment_status.clone()),
            metadata: Set(tx.metadata.clone()),
            created_at: Set(tx.created_at),
        }
        .insert(&self.db)
        .await
        .context("create payment transaction")?;
        Ok(())
    }

    async fn update_status(
        &self,
        session_id: &str,
        payment_status: &str,
    ) -> Result<bool, TiendaServiceError> {
        let result = payment_transactions::Entity::update_many()
            .filter(payment_transactions::Column::SessionId.eq(session_id))
            .col_expr(
                payment_transactions::Column::PaymentStatus,
                Expr::value(payment_status),
            )
            .exec(&self.db)
            .await
            .context("update payment transaction status")?;
        Ok(result.rows_affected > 0)
    }
}
