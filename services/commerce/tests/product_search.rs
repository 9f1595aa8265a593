//! Product search and cascade behavior against a live database
//!
//! Run with `TEST_MODE=1 cargo test -- --ignored`.

mod support;

use commerce::{
    models::{
        order::{CreateOrderRequest, OrderItemInput},
        product::{CreateProductRequest, ProductSearchParams},
    },
    repositories::{order::OrderRepository, product::ProductRepository},
};
use serial_test::serial;

fn product(name: &str, price: f64, category: &str, stock_quantity: i32) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        description: Some(format!("{name} for serious athletes")),
        price,
        category: Some(category.to_string()),
        brand: Some("SportGear".to_string()),
        sport: Some("football".to_string()),
        gender: Some("unisex".to_string()),
        in_stock: true,
        stock_quantity,
        image_url: None,
    }
}

async fn seed_catalog(products: &ProductRepository) {
    for p in [
        product("Ball", 20.0, "Balls", 5),
        product("Trail Shoe", 60.0, "Shoes", 8),
        product("Stadium Shoe", 95.0, "Shoes", 0),
        product("Jersey", 120.0, "Apparel", 12),
    ] {
        products.create(&p).await.expect("seed product");
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn price_band_returns_only_products_in_range() {
    let pool = support::test_pool().await;
    let products = ProductRepository::new(pool);
    seed_catalog(&products).await;

    let params = ProductSearchParams {
        min_price: Some(50.0),
        max_price: Some(100.0),
        ..ProductSearchParams::default()
    };
    let found = products.search(&params, 0, 100).await.expect("search");

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.price >= 50.0 && p.price <= 100.0));

    let params = ProductSearchParams {
        min_price: Some(50.0),
        max_price: Some(100.0),
        category: Some("Shoes".to_string()),
        ..ProductSearchParams::default()
    };
    let found = products.search(&params, 0, 100).await.expect("search");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.category.as_deref() == Some("Shoes")));
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn max_price_scenario_from_the_catalog() {
    let pool = support::test_pool().await;
    let products = ProductRepository::new(pool);
    products
        .create(&product("Ball", 20.0, "Balls", 5))
        .await
        .expect("create product");

    let params = ProductSearchParams {
        max_price: Some(25.0),
        ..ProductSearchParams::default()
    };
    let found = products.search(&params, 0, 100).await.expect("search");
    assert!(found.iter().any(|p| p.name == "Ball"));

    let params = ProductSearchParams {
        max_price: Some(10.0),
        ..ProductSearchParams::default()
    };
    let found = products.search(&params, 0, 100).await.expect("search");
    assert!(found.is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn text_query_matches_name_description_or_brand_case_insensitively() {
    let pool = support::test_pool().await;
    let products = ProductRepository::new(pool);
    seed_catalog(&products).await;

    let params = ProductSearchParams {
        q: Some("jersey".to_string()),
        ..ProductSearchParams::default()
    };
    let found = products.search(&params, 0, 100).await.expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Jersey");

    // Brand matches catch every seeded product
    let params = ProductSearchParams {
        q: Some("SPORTGEAR".to_string()),
        ..ProductSearchParams::default()
    };
    let found = products.search(&params, 0, 100).await.expect("search");
    assert_eq!(found.len(), 4);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn in_stock_filter_requires_flag_and_positive_quantity() {
    let pool = support::test_pool().await;
    let products = ProductRepository::new(pool);
    seed_catalog(&products).await;

    let params = ProductSearchParams {
        category: Some("Shoes".to_string()),
        in_stock: Some(true),
        ..ProductSearchParams::default()
    };
    let found = products.search(&params, 0, 100).await.expect("search");

    // "Stadium Shoe" is flagged in stock but has zero quantity
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Trail Shoe");
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn deleting_a_product_cascades_to_its_order_items() {
    let pool = support::test_pool().await;
    let products = ProductRepository::new(pool.clone());
    let orders = OrderRepository::new(pool.clone());

    let ball = products
        .create(&product("Ball", 20.0, "Balls", 5))
        .await
        .expect("create product");

    let (order, items) = orders
        .create(&CreateOrderRequest {
            user_id: "5f7e1f2a-0c1e-4f3b-9b7a-2d9f8f3a1c55".to_string(),
            total: 40.0,
            shipping_address: None,
            items: vec![OrderItemInput {
                product_id: ball.id,
                quantity: 2,
                unit_price: 20.0,
            }],
        })
        .await
        .expect("create order");
    assert_eq!(items.len(), 1);

    let deleted = products.delete(ball.id).await.expect("delete product");
    assert!(deleted);

    let remaining = orders.items_for(order.id).await.expect("list items");
    assert!(remaining.is_empty(), "order items must follow the cascade");
}
