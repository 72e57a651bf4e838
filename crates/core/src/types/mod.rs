//! Core types for ShopHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod cart;
pub mod id;
pub mod order;
pub mod product;

pub use address::{Address, NewAddress};
pub use cart::{CartLine, CartSnapshot};
pub use id::*;
pub use order::{Order, OrderDraft, OrderStatus};
pub use product::Product;
