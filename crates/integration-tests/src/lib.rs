//! Integration tests for Tienda.
//!
//! The catalog feed and the payment endpoint are replaced by in-process
//! `axum` servers bound to an ephemeral port, so the suite runs offline.
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_client` - Feed requests, caching, error mapping
//! - `cart_sessions` - Cart persistence across sessions
//! - `checkout_flow` - Payment submission and post-checkout policy

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tienda_storefront::config::{CatalogConfig, StorefrontConfig};
use url::Url;

/// Serve `router` on 127.0.0.1 with an ephemeral port and return its base URL.
pub async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });
    Url::parse(&format!("http://{addr}")).expect("Invalid test server URL")
}

/// Storefront config pointing at test servers, built without touching the
/// process environment.
pub fn test_config(vars: &[(&str, &str)]) -> StorefrontConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test config")
}

/// Catalog config for a mock feed.
pub fn catalog_config(base_url: &Url) -> CatalogConfig {
    CatalogConfig {
        base_url: base_url.clone(),
        cache_ttl: Duration::from_secs(300),
        cache_capacity: 100,
    }
}

// =============================================================================
// Mock catalog feed
// =============================================================================

/// Products served by the mock feed, in the feed's own JSON shape.
pub fn fixture_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }),
        json!({
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        }),
        json!({
            "id": 5,
            "title": "John Hardy Women's Legends Naga Bracelet",
            "price": 695,
            "description": "From our Legends Collection",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        }),
        json!({
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }),
    ]
}

/// Mock catalog feed with a request counter.
#[derive(Clone, Default)]
pub struct MockCatalog {
    hits: Arc<AtomicUsize>,
}

impl MockCatalog {
    /// Requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Start serving and return the feed base URL.
    pub async fn start(&self) -> Url {
        let router = Router::new()
            .route("/products", get(list_products))
            .route("/products/categories", get(list_categories))
            .route("/products/category/{name}", get(products_in_category))
            .route("/products/{id}", get(get_product))
            .route("/broken/products", get(|| async { StatusCode::BAD_GATEWAY }))
            .route(
                "/busy/products",
                get(|| async { (StatusCode::TOO_MANY_REQUESTS, [("Retry-After", "7")]) }),
            )
            .with_state(self.clone());
        serve(router).await
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

async fn list_products(
    State(mock): State<MockCatalog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.hit();
    let mut products = fixture_products();
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        products.truncate(limit);
    }
    axum::Json(products).into_response()
}

async fn list_categories(State(mock): State<MockCatalog>) -> Response {
    mock.hit();
    axum::Json(json!([
        "electronics",
        "jewelery",
        "men's clothing",
        "women's clothing",
        "garden"
    ]))
        .into_response()
}

async fn products_in_category(
    State(mock): State<MockCatalog>,
    Path(name): Path<String>,
) -> Response {
    mock.hit();
    let products: Vec<Value> = fixture_products()
        .into_iter()
        .filter(|p| p["category"] == name.as_str())
        .collect();
    axum::Json(products).into_response()
}

async fn get_product(State(mock): State<MockCatalog>, Path(id): Path<u64>) -> Response {
    mock.hit();
    fixture_products()
        .into_iter()
        .find(|p| p["id"] == id)
        // The real feed answers unknown IDs with 200 and an empty body.
        .map_or_else(|| StatusCode::OK.into_response(), |p| axum::Json(p).into_response())
}

// =============================================================================
// Mock payment endpoint
// =============================================================================

/// One multipart submission received by the mock payment endpoint.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Text fields by name.
    pub fields: HashMap<String, String>,
    /// File parts by field name: (file name, content type, bytes).
    pub files: HashMap<String, (String, String, Vec<u8>)>,
    pub authorization: Option<String>,
}

/// Mock payment endpoint recording every submission.
#[derive(Clone)]
pub struct MockPayments {
    submissions: Arc<Mutex<Vec<Submission>>>,
    status: Arc<AtomicU16>,
}

impl Default for MockPayments {
    fn default() -> Self {
        Self {
            submissions: Arc::default(),
            status: Arc::new(AtomicU16::new(200)),
        }
    }
}

impl MockPayments {
    /// Answer every subsequent submission with `status`.
    pub fn respond_with(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    /// Submissions received so far.
    #[must_use]
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().expect("poisoned").clone()
    }

    /// Start serving and return the endpoint URL.
    pub async fn start(&self) -> Url {
        let router = Router::new()
            .route("/pagos", post(receive_payment))
            .with_state(self.clone());
        serve(router).await.join("/pagos").expect("Invalid endpoint URL")
    }
}

async fn receive_payment(
    State(mock): State<MockPayments>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut submission = Submission {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        ..Submission::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap_or_default().to_vec();
        match file_name {
            Some(file_name) => {
                submission.files.insert(name, (file_name, content_type, bytes));
            }
            None => {
                submission
                    .fields
                    .insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    mock.submissions.lock().expect("poisoned").push(submission);
    let status = StatusCode::from_u16(mock.status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, "ok").into_response()
}
