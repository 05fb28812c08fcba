use fundas_domain::product::ProductCategory;
use uuid::Uuid;

use tienda::domain::types::ProductFields;
use tienda::error::TiendaServiceError;
use tienda::usecase::product::{
    CreateProductUseCase, DeactivateProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};

use crate::helpers::{MockProductRepo, test_product};

fn fields(price: f64, category: ProductCategory) -> ProductFields {
    ProductFields {
        name: "Funda Test".to_owned(),
        description: "Descripción".to_owned(),
        price,
        category,
        sizes: vec!["M".into()],
        colors: vec!["Negro".into()],
        material: "Neopreno".to_owned(),
        stock: 10,
        image_url: None,
        features: vec![],
    }
}

#[tokio::test]
async fn should_create_product_as_active_with_identity() {
    let repo = MockProductRepo::empty();
    let usecase = CreateProductUseCase { repo: repo.clone() };

    let product = usecase
        .execute(fields(29.99, ProductCategory::Artistic))
        .await
        .unwrap();

    assert!(product.is_active);
    assert_eq!(product.price, 29.99);

    let listed = ListProductsUseCase { repo }.execute(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, product.id);
}

#[tokio::test]
async fn should_filter_listing_by_exact_category() {
    let artistic = test_product(20.0, ProductCategory::Artistic);
    let hockey = test_product(30.0, ProductCategory::Hockey);
    let repo = MockProductRepo::new(vec![artistic.clone(), hockey.clone()]);
    let usecase = ListProductsUseCase { repo };

    let filtered = usecase
        .execute(Some(ProductCategory::Artistic))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, artistic.id);

    let all = usecase.execute(None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn should_hide_deactivated_product_from_listings_but_keep_it_fetchable() {
    let product = test_product(20.0, ProductCategory::Speed);
    let repo = MockProductRepo::new(vec![product.clone()]);

    DeactivateProductUseCase { repo: repo.clone() }
        .execute(product.id)
        .await
        .unwrap();

    let unfiltered = ListProductsUseCase { repo: repo.clone() }
        .execute(None)
        .await
        .unwrap();
    assert!(unfiltered.is_empty());

    let filtered = ListProductsUseCase { repo: repo.clone() }
        .execute(Some(ProductCategory::Speed))
        .await
        .unwrap();
    assert!(filtered.is_empty());

    let fetched = GetProductUseCase { repo }.execute(product.id).await.unwrap();
    assert_eq!(fetched.id, product.id);
    assert!(!fetched.is_active);
}

#[tokio::test]
async fn should_replace_all_fields_but_preserve_identity_and_timestamps() {
    let product = test_product(20.0, ProductCategory::Artistic);
    let repo = MockProductRepo::new(vec![product.clone()]);
    let usecase = UpdateProductUseCase { repo: repo.clone() };

    let updated = usecase
        .execute(product.id, fields(45.5, ProductCategory::Hockey))
        .await
        .unwrap();

    assert_eq!(updated.id, product.id);
    assert_eq!(updated.price, 45.5);
    assert_eq!(updated.category, ProductCategory::Hockey);
    assert_eq!(updated.created_at, product.created_at);
    assert!(updated.is_active);

    let stored = GetProductUseCase { repo }.execute(product.id).await.unwrap();
    assert_eq!(stored.price, 45.5);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_ids() {
    let repo = MockProductRepo::empty();

    let get = GetProductUseCase { repo: repo.clone() }
        .execute(Uuid::new_v4())
        .await;
    assert!(matches!(get, Err(TiendaServiceError::ProductNotFound)));

    let update = UpdateProductUseCase { repo: repo.clone() }
        .execute(Uuid::new_v4(), fields(1.0, ProductCategory::Artistic))
        .await;
    assert!(matches!(update, Err(TiendaServiceError::ProductNotFound)));

    let deactivate = DeactivateProductUseCase { repo }.execute(Uuid::new_v4()).await;
    assert!(matches!(
        deactivate,
        Err(TiendaServiceError::ProductNotFound)
    ));
}
