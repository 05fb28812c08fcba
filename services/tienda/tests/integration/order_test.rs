use fundas_domain::order::OrderStatus;
use fundas_domain::product::ProductCategory;
use uuid::Uuid;

use tienda::domain::types::{CustomerDetails, ProductFields};
use tienda::error::TiendaServiceError;
use tienda::usecase::cart::{CreateCartInput, CreateCartUseCase};
use tienda::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
};
use tienda::usecase::product::UpdateProductUseCase;

use crate::helpers::{
    MockCartRepo, MockOrderRepo, MockProductRepo, test_admin, test_cart, test_cart_item,
    test_order, test_product, test_user,
};

fn customer_details() -> CustomerDetails {
    CustomerDetails {
        name: "Cliente Test".to_owned(),
        email: "cliente@test.com".to_owned(),
        phone: "123456789".to_owned(),
        address: "Calle Test 123".to_owned(),
        city: "Madrid".to_owned(),
        postal_code: "28001".to_owned(),
    }
}

#[tokio::test]
async fn should_copy_cart_total_verbatim_and_start_pending() {
    let cart = test_cart(59.98, None);
    let usecase = CreateOrderUseCase {
        orders: MockOrderRepo::empty(),
        carts: MockCartRepo::new(vec![cart.clone()]),
    };

    let order = usecase
        .execute(CreateOrderInput {
            cart_id: cart.id,
            customer: Some(customer_details()),
            payment_method: "stripe".to_owned(),
            user_id: None,
        })
        .await
        .unwrap();

    assert_eq!(order.total, 59.98);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.cart_id, cart.id);
}

#[tokio::test]
async fn should_reject_unknown_cart_id() {
    let usecase = CreateOrderUseCase {
        orders: MockOrderRepo::empty(),
        carts: MockCartRepo::empty(),
    };

    let result = usecase
        .execute(CreateOrderInput {
            cart_id: Uuid::new_v4(),
            customer: None,
            payment_method: "stripe".to_owned(),
            user_id: None,
        })
        .await;
    assert!(matches!(result, Err(TiendaServiceError::CartNotFound)));
}

/// The full §catalog → cart → order path: 2 × 29.99 lands as 59.98 on the
/// order, and a later catalog reprice touches neither snapshot.
#[tokio::test]
async fn should_keep_order_total_decoupled_from_later_price_changes() {
    let product = test_product(29.99, ProductCategory::Artistic);
    let products = MockProductRepo::new(vec![product.clone()]);
    let carts = MockCartRepo::empty();
    let orders = MockOrderRepo::empty();

    let cart = CreateCartUseCase {
        carts: carts.clone(),
        products: products.clone(),
    }
    .execute(CreateCartInput {
        items: vec![test_cart_item(product.id, 2)],
        user_id: None,
    })
    .await
    .unwrap();
    assert_eq!(cart.total, 59.98);

    let order = CreateOrderUseCase {
        orders: orders.clone(),
        carts: carts.clone(),
    }
    .execute(CreateOrderInput {
        cart_id: cart.id,
        customer: None,
        payment_method: "stripe".to_owned(),
        user_id: None,
    })
    .await
    .unwrap();
    assert_eq!(order.total, 59.98);

    UpdateProductUseCase {
        repo: products.clone(),
    }
    .execute(
        product.id,
        ProductFields {
            price: 199.0,
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category,
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            material: product.material.clone(),
            stock: product.stock,
            image_url: product.image_url.clone(),
            features: product.features.clone(),
        },
    )
    .await
    .unwrap();

    let stored = orders.orders_handle();
    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].total, 59.98);
}

#[tokio::test]
async fn should_list_all_orders_for_admin() {
    let admin = test_admin();
    let customer = test_user("alicia@example.com", "secreta123");
    let orders = MockOrderRepo::new(vec![
        test_order(10.0, Some(customer.id)),
        test_order(20.0, None),
        test_order(30.0, Some(Uuid::new_v4())),
    ]);

    let listed = ListOrdersUseCase { orders }.execute(&admin).await.unwrap();
    assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn should_list_only_own_orders_for_customer() {
    let customer = test_user("alicia@example.com", "secreta123");
    let own = test_order(10.0, Some(customer.id));
    let orders = MockOrderRepo::new(vec![
        own.clone(),
        test_order(20.0, None),
        test_order(30.0, Some(Uuid::new_v4())),
    ]);

    let listed = ListOrdersUseCase { orders }
        .execute(&customer)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, own.id);
}

#[tokio::test]
async fn should_gate_single_order_to_owner_or_admin() {
    let admin = test_admin();
    let owner = test_user("alicia@example.com", "secreta123");
    let stranger = test_user("otro@example.com", "secreta123");
    let order = test_order(10.0, Some(owner.id));
    let orders = MockOrderRepo::new(vec![order.clone()]);

    let usecase = GetOrderUseCase {
        orders: orders.clone(),
    };

    assert_eq!(usecase.execute(&owner, order.id).await.unwrap().id, order.id);
    assert_eq!(usecase.execute(&admin, order.id).await.unwrap().id, order.id);
    assert!(matches!(
        usecase.execute(&stranger, order.id).await,
        Err(TiendaServiceError::Forbidden)
    ));
    assert!(matches!(
        usecase.execute(&admin, Uuid::new_v4()).await,
        Err(TiendaServiceError::OrderNotFound)
    ));
}
