//! REST client for the admin surface of the store backend.
//!
//! Same backend as the storefront, wider scope: the global order list and
//! point mutations on orders and product stock. No caching; admin views
//! always read live data.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use shophub_core::{Order, OrderId, OrderStatus, Product, ProductId};

use crate::config::AdminConfig;

/// Errors that can occur when calling the admin backend.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// HTTP request failed (connection, timeout, or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an unexpected status code.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client for the admin REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AdminApi {
    inner: Arc<AdminApiInner>,
}

struct AdminApiInner {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AdminApi {
    /// Create a new admin client.
    #[must_use]
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            inner: Arc::new(AdminApiInner {
                http: reqwest::Client::new(),
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
                token: config
                    .admin_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<T, AdminApiError> {
        let builder = match &self.inner.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(AdminApiError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminApiError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch every order in the store.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the backend is unreachable or answers
    /// badly.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, AdminApiError> {
        self.execute(self.inner.http.get(self.endpoint("orders")), "orders")
            .await
    }

    /// Update one order's status, returning the updated order.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::NotFound` for an unknown order id.
    #[instrument(skip(self))]
    pub async fn set_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, AdminApiError> {
        #[derive(Serialize)]
        struct Body {
            status: OrderStatus,
        }

        self.execute(
            self.inner
                .http
                .patch(self.endpoint(&format!("orders/{order_id}")))
                .json(&Body { status }),
            &format!("order {order_id}"),
        )
        .await
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` if the backend is unreachable or answers
    /// badly.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, AdminApiError> {
        self.execute(self.inner.http.get(self.endpoint("products")), "products")
            .await
    }

    /// Correct one product's stock count, returning the updated product.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::NotFound` for an unknown product id.
    #[instrument(skip(self))]
    pub async fn set_product_stock(
        &self,
        product_id: &ProductId,
        stock: u32,
    ) -> Result<Product, AdminApiError> {
        #[derive(Serialize)]
        struct Body {
            stock: u32,
        }

        self.execute(
            self.inner
                .http
                .patch(self.endpoint(&format!("products/{product_id}")))
                .json(&Body { stock }),
            &format!("product {product_id}"),
        )
        .await
    }
}
