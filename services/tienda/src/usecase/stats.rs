use chrono::{Duration, Utc};

use crate::domain::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::error::TiendaServiceError;

/// Point-in-time store snapshot for the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_products: u64,
    pub total_users: u64,
    pub total_orders: u64,
    /// Sum of order totals placed within the trailing 30 days; 0 when none.
    pub monthly_sales: f64,
}

pub struct GetStatisticsUseCase<P, U, O>
where
    P: ProductRepository,
    U: UserRepository,
    O: OrderRepository,
{
    pub products: P,
    pub users: U,
    pub orders: O,
}

impl<P, U, O> GetStatisticsUseCase<P, U, O>
where
    P: ProductRepository,
    U: UserRepository,
    O: OrderRepository,
{
    pub async fn execute(&self) -> Result<Statistics, TiendaServiceError> {
        let cutoff = Utc::now() - Duration::days(30);
        Ok(Statistics {
            total_products: self.products.count_active().await?,
            total_users: self.users.count_active().await?,
            total_orders: self.orders.count().await?,
            monthly_sales: self.orders.sum_totals_since(cutoff).await?,
        })
    }
}
