//! ShopHub Core - Shared types library.
//!
//! This crate provides common types used across all ShopHub components:
//! - `storefront` - Cart/wishlist engine, checkout, and backend client
//! - `admin` - Order/stock reconciliation for store operators
//! - `cli` - Command-line driver for the storefront and admin surfaces
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs plus the product, cart, address, and order types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
