use sea_orm::entity::prelude::*;

/// Mirror of a provider checkout session. One row per `session_id`;
/// `payment_status` is overwritten in place on every poll or webhook,
/// no history is kept.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub session_id: String,
    pub user_id: Option<Uuid>,
    pub cart_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub payment_status: String,
    pub metadata: Json,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
