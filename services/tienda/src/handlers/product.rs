use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fundas_domain::product::ProductCategory;

use crate::domain::types::{Product, ProductFields};
use crate::error::TiendaServiceError;
use crate::handlers::{BearerHeader, require_user};
use crate::state::AppState;
use crate::usecase::auth::require_admin;
use crate::usecase::product::{
    CreateProductUseCase, DeactivateProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};

// ── DTOs ─────────────────────────────────────────────────────────────────────

/// Client-supplied product fields, shared by create and replace.
#[derive(Deserialize)]
pub struct ProductRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: ProductCategory,
    #[serde(rename = "tallas_disponibles")]
    pub sizes: Vec<String>,
    #[serde(rename = "colores_disponibles")]
    pub colors: Vec<String>,
    pub material: String,
    pub stock: i32,
    #[serde(rename = "imagen_url")]
    pub image_url: Option<String>,
    #[serde(rename = "caracteristicas", default)]
    pub features: Vec<String>,
}

impl From<ProductRequest> for ProductFields {
    fn from(body: ProductRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price,
            category: body.category,
            sizes: body.sizes,
            colors: body.colors,
            material: body.material,
            stock: body.stock,
            image_url: body.image_url,
            features: body.features,
        }
    }
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: ProductCategory,
    #[serde(rename = "tallas_disponibles")]
    pub sizes: Vec<String>,
    #[serde(rename = "colores_disponibles")]
    pub colors: Vec<String>,
    pub material: String,
    pub stock: i32,
    #[serde(rename = "imagen_url")]
    pub image_url: Option<String>,
    #[serde(rename = "caracteristicas")]
    pub features: Vec<String>,
    #[serde(rename = "activo")]
    pub is_active: bool,
    #[serde(
        rename = "fecha_creacion",
        serialize_with = "fundas_core::serde::to_rfc3339_ms"
    )]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            sizes: product.sizes,
            colors: product.colors,
            material: product.material,
            stock: product.stock,
            image_url: product.image_url,
            features: product.features,
            is_active: product.is_active,
            created_at: product.created_at,
        }
    }
}

// ── POST /productos ──────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    bearer: BearerHeader,
    Json(body): Json<ProductRequest>,
) -> Result<Json<ProductResponse>, TiendaServiceError> {
    let user = require_user(&state, &bearer).await?;
    require_admin(&user)?;

    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(body.into()).await?;
    Ok(Json(product.into()))
}

// ── GET /productos ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ProductListQuery {
    pub categoria: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductResponse>>, TiendaServiceError> {
    // An unknown category matches nothing rather than erroring, as if the
    // raw value had been passed through to the store's filter.
    let category = match query.categoria.as_deref() {
        None => None,
        Some(raw) => match ProductCategory::from_str(raw) {
            Some(category) => Some(category),
            None => return Ok(Json(Vec::new())),
        },
    };

    let usecase = ListProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(category).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── GET /productos/{id} ──────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, TiendaServiceError> {
    let usecase = GetProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(id).await?;
    Ok(Json(product.into()))
}

// ── PUT /productos/{id} ──────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    bearer: BearerHeader,
    Json(body): Json<ProductRequest>,
) -> Result<Json<ProductResponse>, TiendaServiceError> {
    let user = require_user(&state, &bearer).await?;
    require_admin(&user)?;

    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(id, body.into()).await?;
    Ok(Json(product.into()))
}

// ── DELETE /productos/{id} ───────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    bearer: BearerHeader,
) -> Result<Json<serde_json::Value>, TiendaServiceError> {
    let user = require_user(&state, &bearer).await?;
    require_admin(&user)?;

    let usecase = DeactivateProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Producto eliminado correctamente"
    })))
}

// ── GET /categorias ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CategoryResponse {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categorias: Vec<CategoryResponse>,
}

pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categorias: ProductCategory::ALL
            .into_iter()
            .map(|category| CategoryResponse {
                value: category.as_str(),
                label: category.label(),
            })
            .collect(),
    })
}
