//! Cache types for catalog responses.

use std::sync::Arc;

use shophub_core::Product;

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Arc<Product>),
    Products(Arc<Vec<Product>>),
    Categories(Arc<Vec<String>>),
}
