//! Tienda Core - Cart state and shared types.
//!
//! This crate provides the types used across all Tienda components:
//! - `storefront` - Cart store, catalog client, and checkout flow
//! - `cli` - Command-line views over the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients, no storage backends. The cart reducer and its derived
//! aggregates live here so they can be tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and categories
//! - [`cart`] - Line items, cart state transitions, and derived totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
