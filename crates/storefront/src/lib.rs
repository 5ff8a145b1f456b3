//! Tienda Storefront library.
//!
//! Everything behind the views: the session cart store and its persistence
//! bridge, the catalog feed client, and the payment confirmation flow.
//!
//! # Modules
//!
//! - [`cart`] - `CartStore` and key-value storage backends
//! - [`catalog`] - Product feed client with response caching
//! - [`checkout`] - Payment form, payment client, post-checkout policy
//! - [`config`] - Environment configuration
//! - [`error`] - Unified `AppError`
//! - [`state`] - Shared `AppState`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;

pub use error::{AppError, Result};
pub use state::{AppState, SessionCart};
