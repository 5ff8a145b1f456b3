//! Catalog client against a mock product feed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tienda_core::{Category, Price, ProductId};
use tienda_storefront::catalog::{CatalogClient, CatalogError};
use tienda_integration_tests::{MockCatalog, catalog_config};

async fn client() -> (MockCatalog, CatalogClient) {
    let mock = MockCatalog::default();
    let base = mock.start().await;
    (mock, CatalogClient::new(&catalog_config(&base)))
}

#[tokio::test]
async fn lists_every_product() {
    let (_mock, catalog) = client().await;

    let products = catalog.list_products(None).await.unwrap();

    assert_eq!(products.len(), 4);
    assert_eq!(products[0].id, ProductId::new(1));
    assert_eq!(products[0].price, Price::from_cents(10995));
    assert_eq!(products[2].price, Price::from_cents(69500));
}

#[tokio::test]
async fn category_filter_encodes_spaces_and_apostrophes() {
    let (_mock, catalog) = client().await;

    let products = catalog
        .list_products(Some(&Category::MensClothing))
        .await
        .unwrap();

    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.category == Category::MensClothing));
}

#[tokio::test]
async fn unknown_category_is_an_empty_list() {
    let (_mock, catalog) = client().await;

    let products = catalog
        .list_products(Some(&Category::Other("garden".to_string())))
        .await
        .unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn featured_products_respects_limit() {
    let (_mock, catalog) = client().await;

    let featured = catalog.featured_products(3).await.unwrap();

    assert_eq!(featured.len(), 3);
    assert_eq!(featured[0].id, ProductId::new(1));
}

#[tokio::test]
async fn get_product_found() {
    let (_mock, catalog) = client().await;

    let product = catalog.get_product(ProductId::new(9)).await.unwrap();

    assert_eq!(product.title, "WD 2TB Elements Portable External Hard Drive");
    assert_eq!(product.category, Category::Electronics);
    assert_eq!(product.rating.map(|r| r.count), Some(203));
}

#[tokio::test]
async fn get_product_empty_body_is_not_found() {
    let (_mock, catalog) = client().await;

    let err = catalog.get_product(ProductId::new(404)).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn categories_keep_unknown_names() {
    let (_mock, catalog) = client().await;

    let categories = catalog.categories().await.unwrap();

    assert_eq!(
        categories,
        vec![
            Category::Electronics,
            Category::Jewelery,
            Category::MensClothing,
            Category::WomensClothing,
            Category::Other("garden".to_string()),
        ]
    );
}

#[tokio::test]
async fn repeated_requests_are_served_from_cache() {
    let (mock, catalog) = client().await;

    catalog.list_products(None).await.unwrap();
    catalog.list_products(None).await.unwrap();
    catalog.get_product(ProductId::new(1)).await.unwrap();
    catalog.get_product(ProductId::new(1)).await.unwrap();

    assert_eq!(mock.hits(), 2);
}

#[tokio::test]
async fn clones_share_the_cache() {
    let (mock, catalog) = client().await;
    let other = catalog.clone();

    catalog.categories().await.unwrap();
    other.categories().await.unwrap();

    assert_eq!(mock.hits(), 1);
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let mock = MockCatalog::default();
    let base = mock.start().await.join("broken").unwrap();
    let catalog = CatalogClient::new(&catalog_config(&base));

    let err = catalog.list_products(None).await.unwrap_err();

    assert!(matches!(err, CatalogError::Status { status: 502, .. }), "got {err:?}");
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let mock = MockCatalog::default();
    let base = mock.start().await.join("busy").unwrap();
    let catalog = CatalogClient::new(&catalog_config(&base));

    let err = catalog.list_products(None).await.unwrap_err();

    assert!(matches!(err, CatalogError::RateLimited(7)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_feed_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base = url::Url::parse(&format!("http://{addr}")).unwrap();
    let catalog = CatalogClient::new(&catalog_config(&base));

    let err = catalog.categories().await.unwrap_err();

    assert!(matches!(err, CatalogError::Http(_)), "got {err:?}");
}
