use sea_orm::entity::prelude::*;

/// Catalog entry for a boot cover. "Deleting" a product only flips
/// `is_active`; inactive rows stay fetchable by id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub material: String,
    pub stock: i32,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
