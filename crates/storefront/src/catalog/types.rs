//! Catalog feed types.

use serde::{Deserialize, Serialize};
use tienda_core::{Category, LineItemInput, Price, ProductId};

/// A product as served by the catalog feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average stars, 0-5.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

impl From<&Product> for LineItemInput {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

impl From<Product> for LineItemInput {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
        }
    }
}
