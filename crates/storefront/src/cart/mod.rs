//! Session cart: the store and its persistence backends.
//!
//! # Example
//!
//! ```rust
//! use tienda_core::{LineItemInput, Price, ProductId};
//! use tienda_storefront::cart::{CartStore, MemoryStorage};
//!
//! let mut cart = CartStore::open(MemoryStorage::new());
//! cart.add(LineItemInput {
//!     id: ProductId::new(1),
//!     title: "Shirt".to_string(),
//!     price: Price::from_cents(1999),
//!     image: "a.png".to_string(),
//! });
//! cart.add(LineItemInput {
//!     id: ProductId::new(1),
//!     title: "Shirt".to_string(),
//!     price: Price::from_cents(1999),
//!     image: "a.png".to_string(),
//! });
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().display(), "$39.98");
//! ```

mod storage;
mod store;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, NoopStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
