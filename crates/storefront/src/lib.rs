//! ShopHub Storefront library.
//!
//! The client-side cart/order consistency engine: a locally-owned,
//! persisted cart and wishlist with stock-bound invariants on every
//! mutation, derived totals, and exactly-once handoff of a consistent
//! snapshot to order creation.
//!
//! # Modules
//!
//! - [`store`] - durable snapshot persistence (single JSON blob)
//! - [`cart`] - the cart/wishlist engine owning in-memory state
//! - [`checkout`] - the checkout orchestrator state machine
//! - [`api`] - REST client for the catalog, order, and address backends
//! - [`identity`] - the authenticated user handed in by the identity provider
//! - [`config`] - environment-driven configuration
//! - [`error`] - unified application error

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod identity;
pub mod store;
