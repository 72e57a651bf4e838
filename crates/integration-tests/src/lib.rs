//! Integration tests for ShopHub.
//!
//! These tests drive the cart engine, checkout orchestrator, and admin
//! reconciliation view through their public APIs, with file-backed stores
//! in temporary directories and in-process backend stubs. No live backend
//! is required.
//!
//! # Test Categories
//!
//! - `cart_persistence` - engine invariants across process restarts
//! - `checkout_flow` - end-to-end order placement scenarios
//! - `admin_reconciliation` - dashboard statistics and point mutations

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use shophub_core::{Address, AddressId, Product, ProductId, UserId};

/// A catalog product fixture.
#[must_use]
pub fn product(id: &str, price: Decimal, stock: Option<u32>) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price,
        stock,
        category: "fixtures".to_string(),
        image: format!("https://cdn.example.com/{id}.jpg"),
        rating: 4.2,
        review_count: 17,
    }
}

/// A saved-address fixture owned by `user_id`.
#[must_use]
pub fn address(id: &str, user_id: &UserId) -> Address {
    Address {
        id: AddressId::new(id),
        user_id: user_id.clone(),
        label: "Home".to_string(),
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62704".to_string(),
        phone: "555-0100".to_string(),
    }
}
