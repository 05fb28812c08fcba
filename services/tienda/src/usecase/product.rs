use chrono::Utc;
use uuid::Uuid;

use fundas_domain::product::ProductCategory;

use crate::domain::repository::ProductRepository;
use crate::domain::types::{Product, ProductFields};
use crate::error::TiendaServiceError;

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(&self, fields: ProductFields) -> Result<Product, TiendaServiceError> {
        let product = Product {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            sizes: fields.sizes,
            colors: fields.colors,
            material: fields.material,
            stock: fields.stock,
            image_url: fields.image_url,
            features: fields.features,
            is_active: true,
            created_at: Utc::now(),
        };
        self.repo.create(&product).await?;
        Ok(product)
    }
}

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    pub async fn execute(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, TiendaServiceError> {
        self.repo.list_active(category).await
    }
}

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> GetProductUseCase<R> {
    /// Fetch by id regardless of the active flag.
    pub async fn execute(&self, id: Uuid) -> Result<Product, TiendaServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(TiendaServiceError::ProductNotFound)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    /// Full-record replace of the client-controlled fields; identity,
    /// active flag and creation timestamp survive unchanged.
    pub async fn execute(
        &self,
        id: Uuid,
        fields: ProductFields,
    ) -> Result<Product, TiendaServiceError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(TiendaServiceError::ProductNotFound)?;
        self.repo.replace(id, &fields).await?;
        Ok(Product {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            sizes: fields.sizes,
            colors: fields.colors,
            material: fields.material,
            stock: fields.stock,
            image_url: fields.image_url,
            features: fields.features,
            is_active: existing.is_active,
            created_at: existing.created_at,
        })
    }
}

// ── DeactivateProduct ────────────────────────────────────────────────────────

pub struct DeactivateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeactivateProductUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), TiendaServiceError> {
        if !self.repo.deactivate(id).await? {
            return Err(TiendaServiceError::ProductNotFound);
        }
        Ok(())
    }
}
