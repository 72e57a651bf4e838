//! Unified error handling for storefront callers.
//!
//! Provides a single `AppError` over the module errors so binaries can
//! hold one error type. Cart validation rejections are deliberately NOT
//! part of this type: they are user-facing notices carried in operation
//! results, not failures. Snapshot-store failures never surface here
//! either; the engine swallows them as best-effort durability.

use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Checkout orchestration failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Api(ApiError::NotFound("product p-1".to_string()));
        assert_eq!(err.to_string(), "Backend error: Not found: product p-1");

        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: Cart is empty");
    }
}
