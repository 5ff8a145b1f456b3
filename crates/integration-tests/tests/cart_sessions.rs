//! Cart persistence across sessions through the configured data directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tempfile::TempDir;
use tienda_core::{LineItemInput, Price, ProductId};
use tienda_integration_tests::test_config;
use tienda_storefront::AppState;
use tienda_storefront::cart::{CART_STORAGE_KEY, FileStorage};

fn item(id: u32, cents: i64) -> LineItemInput {
    LineItemInput {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::from_cents(cents),
        image: format!("https://img.example/{id}.png"),
    }
}

fn state(dir: &TempDir, persist: &str) -> AppState {
    let data_dir = dir.path().to_str().unwrap();
    AppState::new(test_config(&[
        ("TIENDA_DATA_DIR", data_dir),
        ("TIENDA_PERSIST_CART", persist),
    ]))
}

fn cart_file(dir: &TempDir) -> std::path::PathBuf {
    FileStorage::new(dir.path()).path_for(CART_STORAGE_KEY)
}

#[test]
fn cart_survives_a_new_session() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = state(&dir, "true").open_cart();
        cart.add(item(3, 1000));
        cart.add(item(1, 250));
        cart.add(item(3, 1000));
    }

    let cart = state(&dir, "true").open_cart();
    let ids: Vec<u32> = cart.items().iter().map(|i| i.id.as_u32()).collect();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Price::from_cents(2250));
}

#[test]
fn saved_blob_uses_numeric_prices() {
    let dir = TempDir::new().unwrap();
    let mut cart = state(&dir, "true").open_cart();
    cart.add(item(1, 1999));

    let raw = std::fs::read_to_string(cart_file(&dir)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let price = value["items"][0]["price"].as_f64().expect("price is a JSON number");
    assert!((price - 19.99).abs() < 1e-9);
    assert_eq!(value["items"][0]["quantity"], 1);
}

#[test]
fn removals_are_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let mut cart = state(&dir, "true").open_cart();
        cart.add(item(1, 100));
        cart.add(item(1, 100));
        cart.add(item(2, 200));
        cart.remove(ProductId::new(1));
        cart.remove_all_units(ProductId::new(2));
    }

    let cart = state(&dir, "true").open_cart();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced_on_change() {
    let dir = TempDir::new().unwrap();
    std::fs::write(cart_file(&dir), "{not json").unwrap();

    let mut cart = state(&dir, "true").open_cart();
    assert!(cart.is_empty());

    cart.add(item(7, 700));
    drop(cart);

    let cart = state(&dir, "true").open_cart();
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn duplicate_ids_on_disk_start_empty() {
    let dir = TempDir::new().unwrap();
    let blob = r#"{"items":[
        {"id":1,"title":"A","price":1.0,"image":"a","quantity":1},
        {"id":1,"title":"A","price":1.0,"image":"a","quantity":2}
    ]}"#;
    std::fs::write(cart_file(&dir), blob).unwrap();

    let cart = state(&dir, "true").open_cart();

    assert!(cart.is_empty());
}

#[test]
fn disabled_persistence_writes_nothing() {
    let dir = TempDir::new().unwrap();

    let mut cart = state(&dir, "false").open_cart();
    cart.add(item(1, 100));

    assert_eq!(cart.item_count(), 1);
    assert!(!cart_file(&dir).exists());
    assert!(state(&dir, "false").open_cart().is_empty());
}
