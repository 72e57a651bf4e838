//! The admin reconciliation view.
//!
//! Reads all orders and products, derives aggregate statistics, and issues
//! point mutations back through the backend. Mutations are applied to the
//! local lists only after backend acknowledgment, never speculatively, so
//! the displayed state cannot diverge from the authoritative one.

use rust_decimal::Decimal;
use thiserror::Error;

use shophub_core::{Order, OrderId, OrderStatus, Product, ProductId};

use crate::api::{AdminApi, AdminApiError};

/// Products with fewer than this many units (but more than zero) count as
/// low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Errors raised by the reconciliation view.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// The backend call failed; the local lists are unchanged.
    #[error("Backend error: {0}")]
    Backend(#[from] AdminApiError),

    /// The mutation referenced an order that is not in the loaded list.
    #[error("Order {0} is not loaded")]
    UnknownOrder(OrderId),

    /// The mutation referenced a product that is not in the loaded list.
    #[error("Product {0} is not loaded")]
    UnknownProduct(ProductId),
}

/// Aggregate statistics over the fetched collections.
///
/// Recomputed wholesale on every [`Reconciliation::load`]; admin views are
/// low-frequency and the collections are small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub total_revenue: Decimal,
    /// Count of products with `0 < stock < LOW_STOCK_THRESHOLD`.
    pub low_stock_count: usize,
}

impl DashboardStats {
    fn compute(orders: &[Order], products: &[Product]) -> Self {
        Self {
            total_orders: orders.len(),
            total_revenue: orders.iter().map(|o| o.total).sum(),
            low_stock_count: products
                .iter()
                .filter(|p| {
                    p.stock
                        .is_some_and(|s| s > 0 && s < LOW_STOCK_THRESHOLD)
                })
                .count(),
        }
    }
}

/// Backend operations the reconciliation view depends on.
///
/// `AdminApi` implements this; tests substitute stubs.
#[allow(async_fn_in_trait)]
pub trait AdminBackend {
    /// Fetch every order in the store.
    async fn list_orders(&self) -> Result<Vec<Order>, AdminApiError>;

    /// Fetch the full product list.
    async fn list_products(&self) -> Result<Vec<Product>, AdminApiError>;

    /// Update one order's status, returning the updated order.
    async fn set_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, AdminApiError>;

    /// Correct one product's stock, returning the updated product.
    async fn set_product_stock(
        &self,
        product_id: &ProductId,
        stock: u32,
    ) -> Result<Product, AdminApiError>;
}

impl AdminBackend for AdminApi {
    async fn list_orders(&self) -> Result<Vec<Order>, AdminApiError> {
        Self::list_orders(self).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, AdminApiError> {
        Self::list_products(self).await
    }

    async fn set_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, AdminApiError> {
        Self::set_order_status(self, order_id, status).await
    }

    async fn set_product_stock(
        &self,
        product_id: &ProductId,
        stock: u32,
    ) -> Result<Product, AdminApiError> {
        Self::set_product_stock(self, product_id, stock).await
    }
}

/// View state over the admin's order and product lists.
pub struct Reconciliation<B> {
    backend: B,
    orders: Vec<Order>,
    products: Vec<Product>,
    stats: DashboardStats,
}

impl<B: AdminBackend> Reconciliation<B> {
    /// Create an empty view; call [`Self::load`] to populate it.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            orders: Vec::new(),
            products: Vec::new(),
            stats: DashboardStats {
                total_orders: 0,
                total_revenue: Decimal::ZERO,
                low_stock_count: 0,
            },
        }
    }

    /// Fetch all orders (newest first) and products, recomputing the
    /// aggregate statistics from the full collections.
    ///
    /// # Errors
    ///
    /// Returns `ReconciliationError::Backend` on fetch failure; the
    /// previously loaded lists are unchanged.
    pub async fn load(&mut self) -> Result<(), ReconciliationError> {
        let mut orders = self.backend.list_orders().await?;
        let products = self.backend.list_products().await?;

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.stats = DashboardStats::compute(&orders, &products);
        self.orders = orders;
        self.products = products;
        Ok(())
    }

    /// The loaded orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The loaded products, in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Statistics as of the last [`Self::load`].
    #[must_use]
    pub const fn stats(&self) -> DashboardStats {
        self.stats
    }

    /// Change an order's status.
    ///
    /// The local list is updated only after the backend acknowledges the
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `ReconciliationError::UnknownOrder` for an id that is not
    /// loaded, or `Backend` if the write fails (local state unchanged).
    pub async fn set_status(
        &mut self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), ReconciliationError> {
        if !self.orders.iter().any(|o| &o.id == order_id) {
            return Err(ReconciliationError::UnknownOrder(order_id.clone()));
        }

        let updated = self.backend.set_order_status(order_id, status).await?;

        if let Some(order) = self.orders.iter_mut().find(|o| &o.id == order_id) {
            order.status = updated.status;
        }
        Ok(())
    }

    /// Correct a product's stock count.
    ///
    /// The local list is updated only after the backend acknowledges the
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `ReconciliationError::UnknownProduct` for an id that is not
    /// loaded, or `Backend` if the write fails (local state unchanged).
    pub async fn correct_stock(
        &mut self,
        product_id: &ProductId,
        stock: u32,
    ) -> Result<(), ReconciliationError> {
        if !self.products.iter().any(|p| &p.id == product_id) {
            return Err(ReconciliationError::UnknownProduct(product_id.clone()));
        }

        let updated = self.backend.set_product_stock(product_id, stock).await?;

        if let Some(product) = self.products.iter_mut().find(|p| &p.id == product_id) {
            product.stock = updated.stock;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use chrono::{TimeZone, Utc};
    use shophub_core::{Address, AddressId, UserId};

    use super::*;

    #[derive(Default)]
    struct StubBackend {
        orders: Vec<Order>,
        products: Vec<Product>,
        fail_writes: Cell<bool>,
    }

    impl AdminBackend for &StubBackend {
        async fn list_orders(&self) -> Result<Vec<Order>, AdminApiError> {
            Ok(self.orders.clone())
        }

        async fn list_products(&self) -> Result<Vec<Product>, AdminApiError> {
            Ok(self.products.clone())
        }

        async fn set_order_status(
            &self,
            order_id: &OrderId,
            status: OrderStatus,
        ) -> Result<Order, AdminApiError> {
            if self.fail_writes.get() {
                return Err(AdminApiError::Status {
                    status: 500,
                    body: "write failed".to_string(),
                });
            }
            let mut order = self
                .orders
                .iter()
                .find(|o| &o.id == order_id)
                .cloned()
                .ok_or_else(|| AdminApiError::NotFound(order_id.to_string()))?;
            order.status = status;
            Ok(order)
        }

        async fn set_product_stock(
            &self,
            product_id: &ProductId,
            stock: u32,
        ) -> Result<Product, AdminApiError> {
            if self.fail_writes.get() {
                return Err(AdminApiError::Status {
                    status: 500,
                    body: "write failed".to_string(),
                });
            }
            let mut product = self
                .products
                .iter()
                .find(|p| &p.id == product_id)
                .cloned()
                .ok_or_else(|| AdminApiError::NotFound(product_id.to_string()))?;
            product.stock = Some(stock);
            Ok(product)
        }
    }

    fn order(id: &str, total: Decimal, day: u32) -> Order {
        Order {
            id: OrderId::new(id),
            user_id: UserId::new("u-1"),
            items: vec![],
            address: Address {
                id: AddressId::new("a-1"),
                user_id: UserId::new("u-1"),
                label: "Home".to_string(),
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                postal_code: "62704".to_string(),
                phone: "555-0100".to_string(),
            },
            subtotal: total,
            tax: Decimal::ZERO,
            total,
            status: OrderStatus::OnProcess,
            created_at: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
        }
    }

    fn product(id: &str, stock: Option<u32>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(1000, 2),
            stock,
            category: "test".to_string(),
            image: String::new(),
            rating: 4.0,
            review_count: 3,
        }
    }

    #[tokio::test]
    async fn test_load_sorts_orders_newest_first_and_computes_stats() {
        let backend = StubBackend {
            orders: vec![
                order("o-1", Decimal::new(4950, 2), 1),
                order("o-2", Decimal::new(1100, 2), 15),
            ],
            products: vec![
                product("p-1", Some(3)),  // low stock
                product("p-2", Some(0)),  // out of stock, not "low"
                product("p-3", Some(50)), // healthy
                product("p-4", None),     // unknown, not "low"
            ],
            ..StubBackend::default()
        };

        let mut view = Reconciliation::new(&backend);
        view.load().await.unwrap();

        assert_eq!(view.orders()[0].id, OrderId::new("o-2"));
        let stats = view.stats();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, Decimal::new(6050, 2));
        assert_eq!(stats.low_stock_count, 1);
    }

    #[tokio::test]
    async fn test_status_change_applies_only_after_ack() {
        let backend = StubBackend {
            orders: vec![order("o-1", Decimal::new(1000, 2), 1)],
            ..StubBackend::default()
        };
        let mut view = Reconciliation::new(&backend);
        view.load().await.unwrap();

        backend.fail_writes.set(true);
        let err = view
            .set_status(&OrderId::new("o-1"), OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::Backend(_)));
        assert_eq!(view.orders()[0].status, OrderStatus::OnProcess);

        backend.fail_writes.set(false);
        view.set_status(&OrderId::new("o-1"), OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(view.orders()[0].status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_status_change_rejects_unloaded_order() {
        let backend = StubBackend::default();
        let mut view = Reconciliation::new(&backend);
        view.load().await.unwrap();

        let err = view
            .set_status(&OrderId::new("ghost"), OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::UnknownOrder(_)));
    }

    #[tokio::test]
    async fn test_stock_correction_applies_only_after_ack() {
        let backend = StubBackend {
            products: vec![product("p-1", Some(2))],
            ..StubBackend::default()
        };
        let mut view = Reconciliation::new(&backend);
        view.load().await.unwrap();

        backend.fail_writes.set(true);
        assert!(
            view.correct_stock(&ProductId::new("p-1"), 40)
                .await
                .is_err()
        );
        assert_eq!(view.products()[0].stock, Some(2));

        backend.fail_writes.set(false);
        view.correct_stock(&ProductId::new("p-1"), 40).await.unwrap();
        assert_eq!(view.products()[0].stock, Some(40));
    }
}
