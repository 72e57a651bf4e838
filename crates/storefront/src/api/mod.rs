//! REST client for the store backend.
//!
//! One JSON/REST backend serves the catalog, orders, and addresses; the
//! document-store deployment exposes the same contract, so the client is
//! written against it alone. Catalog reads are cached with `moka`
//! (5-minute TTL). Orders and addresses are always fetched live.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use shophub_core::{Address, NewAddress, Order, OrderDraft, OrderId, Product, ProductId, UserId};

use crate::checkout::CheckoutBackend;
use crate::config::StorefrontConfig;

use cache::CacheValue;

const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes
const CATALOG_CACHE_CAPACITY: u64 = 1000;

const PRODUCTS_KEY: &str = "products";
const CATEGORIES_KEY: &str = "categories";

/// Errors that can occur when calling the store backend.
#[derive(Debug, Error)]
pub enum ApiError {
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

/// Client for the store backend REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct StorefrontApi {
    inner: Arc<StorefrontApiInner>,
}

struct StorefrontApiInner {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    cache: Cache<String, CacheValue>,
}

impl StorefrontApi {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(StorefrontApiInner {
                http: reqwest::Client::new(),
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
                token: config
                    .api_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
                cache,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body, mapping 404 to `NotFound`.
    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = self.request(builder).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.json().await?)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full product list (cached).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend is unreachable or answers badly.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(PRODUCTS_KEY).await
        {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let products: Vec<Product> = self
            .execute(self.inner.http.get(self.endpoint("products")), "products")
            .await?;
        let products = Arc::new(products);

        self.inner
            .cache
            .insert(
                PRODUCTS_KEY.to_string(),
                CacheValue::Products(Arc::clone(&products)),
            )
            .await;
        Ok(products)
    }

    /// Fetch a single product by id (cached).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the catalog has no such product.
    #[instrument(skip(self))]
    pub async fn product(&self, id: &ProductId) -> Result<Arc<Product>, ApiError> {
        let key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product {id}");
            return Ok(product);
        }

        let product: Product = self
            .execute(
                self.inner
                    .http
                    .get(self.endpoint(&format!("products/{id}"))),
                &format!("product {id}"),
            )
            .await?;
        let product = Arc::new(product);

        self.inner
            .cache
            .insert(key, CacheValue::Product(Arc::clone(&product)))
            .await;
        Ok(product)
    }

    /// Fetch the category list (cached).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend is unreachable or answers badly.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<Vec<String>>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(CATEGORIES_KEY).await
        {
            debug!("Cache hit for category list");
            return Ok(categories);
        }

        let categories: Vec<String> = self
            .execute(
                self.inner.http.get(self.endpoint("categories")),
                "categories",
            )
            .await?;
        let categories = Arc::new(categories);

        self.inner
            .cache
            .insert(
                CATEGORIES_KEY.to_string(),
                CacheValue::Categories(Arc::clone(&categories)),
            )
            .await;
        Ok(categories)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch the user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend is unreachable or answers badly.
    #[instrument(skip(self))]
    pub async fn orders(&self, user_id: &UserId) -> Result<Vec<Order>, ApiError> {
        let mut orders: Vec<Order> = self
            .execute(
                self.inner
                    .http
                    .get(self.endpoint("orders"))
                    .query(&[("userId", user_id.as_str())]),
                "orders",
            )
            .await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Create an order from a checkout draft, returning the created order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the draft or is
    /// unreachable. No order exists when an error is returned.
    #[instrument(skip(self, draft))]
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        self.execute(
            self.inner.http.post(self.endpoint("orders")).json(draft),
            "orders",
        )
        .await
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    /// Fetch the user's saved addresses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend is unreachable or answers badly.
    #[instrument(skip(self))]
    pub async fn addresses(&self, user_id: &UserId) -> Result<Vec<Address>, ApiError> {
        self.execute(
            self.inner
                .http
                .get(self.endpoint("addresses"))
                .query(&[("userId", user_id.as_str())]),
            "addresses",
        )
        .await
    }

    /// Create a new address for the user, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the address or is
    /// unreachable.
    #[instrument(skip(self, address))]
    pub async fn create_address(
        &self,
        user_id: &UserId,
        address: &NewAddress,
    ) -> Result<Address, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            user_id: &'a UserId,
            #[serde(flatten)]
            address: &'a NewAddress,
        }

        self.execute(
            self.inner
                .http
                .post(self.endpoint("addresses"))
                .json(&Body { user_id, address }),
            "addresses",
        )
        .await
    }

    // =========================================================================
    // Cart mirror
    // =========================================================================

    /// Clear the server-side mirrored cart for the user.
    ///
    /// A missing mirror (404) counts as cleared; there was nothing to
    /// remove.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on other backend failures. Callers treat this as
    /// best-effort cleanup.
    #[instrument(skip(self))]
    pub async fn clear_cart_mirror(&self, user_id: &UserId) -> Result<(), ApiError> {
        let response = self
            .request(
                self.inner
                    .http
                    .delete(self.endpoint(&format!("carts/{user_id}"))),
            )
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        })
    }
}

impl CheckoutBackend for StorefrontApi {
    async fn fetch_addresses(&self, user_id: &UserId) -> Result<Vec<Address>, ApiError> {
        self.addresses(user_id).await
    }

    async fn create_address(
        &self,
        user_id: &UserId,
        address: NewAddress,
    ) -> Result<Address, ApiError> {
        Self::create_address(self, user_id, &address).await
    }

    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderId, ApiError> {
        let order = self.create_order(draft).await?;
        Ok(order.id)
    }

    async fn clear_cart_mirror(&self, user_id: &UserId) -> Result<(), ApiError> {
        Self::clear_cart_mirror(self, user_id).await
    }
}
