//! The cart/wishlist engine.
//!
//! Owns the in-memory cart and wishlist collections, enforces stock-bound
//! invariants at the point of mutation, computes derived aggregates, and
//! persists a snapshot after every state-changing operation.
//!
//! Stock bounds are checked per mutation rather than at checkout so the
//! caller gets immediate, specific feedback (which operation and why)
//! instead of a late, generic checkout failure. The durable snapshot is
//! never more than one operation stale.

use rust_decimal::Decimal;
use thiserror::Error;

use shophub_core::{CartLine, CartSnapshot, Product, ProductId};

use crate::store::SnapshotStore;

/// What a successful mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line entered the cart with quantity 1.
    AddedToCart,
    /// An existing line's quantity grew by one.
    QuantityIncremented { quantity: u32 },
    /// A line's quantity was set exactly.
    QuantitySet { quantity: u32 },
    /// The line left the cart; removing an absent line lands here too.
    RemovedFromCart,
    /// All lines left the cart. The wishlist is untouched.
    CartCleared,
    AddedToWishlist,
    /// The product was already wishlisted; nothing changed.
    AlreadyInWishlist,
    RemovedFromWishlist,
}

/// Validation rejections. State is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartRejection {
    /// The product reports zero stock.
    #[error("Product is out of stock")]
    OutOfStock,

    /// The requested quantity would exceed the known stock bound.
    #[error("Cannot exceed available stock ({stock} available)")]
    StockExceeded { stock: u32 },

    /// No cart line exists for the product.
    #[error("Product is not in the cart")]
    NotInCart,
}

/// The cart/wishlist engine.
///
/// The engine exclusively owns the in-memory [`CartSnapshot`]; other
/// components read copies or issue commands (`clear_cart`), never reaching
/// into its internals. Mutations are synchronous and applied in invocation
/// order.
pub struct CartEngine<S> {
    state: CartSnapshot,
    store: S,
}

impl<S: SnapshotStore> CartEngine<S> {
    /// Rehydrate the engine from the store.
    ///
    /// Starts empty when nothing has been saved yet or the blob cannot be
    /// read; an unreadable blob is logged, not escalated.
    pub fn load(store: S) -> Self {
        let state = match store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => CartSnapshot::default(),
            Err(e) => {
                tracing::warn!("Failed to load cart snapshot, starting empty: {e}");
                CartSnapshot::default()
            }
        };
        Self { state, store }
    }

    // =========================================================================
    // Cart mutations
    // =========================================================================

    /// Add one unit of `product` to the cart.
    ///
    /// Inserts a new line with quantity 1, or increments the existing line
    /// by one. The increment is bounded by the stock reported on `product`
    /// at add time; unknown stock imposes no bound.
    ///
    /// # Errors
    ///
    /// [`CartRejection::OutOfStock`] if the product reports zero stock,
    /// [`CartRejection::StockExceeded`] if the line is already at the bound.
    pub fn add_to_cart(&mut self, product: &Product) -> Result<CartEvent, CartRejection> {
        if product.is_out_of_stock() {
            return Err(CartRejection::OutOfStock);
        }

        let event = if let Some(line) = self
            .state
            .cart
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            if let Some(stock) = product.stock
                && line.quantity >= stock
            {
                return Err(CartRejection::StockExceeded { stock });
            }
            line.quantity += 1;
            CartEvent::QuantityIncremented {
                quantity: line.quantity,
            }
        } else {
            self.state.cart.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
            CartEvent::AddedToCart
        };

        self.persist();
        Ok(event)
    }

    /// Remove the line for `product_id`. Removing an absent line is a
    /// no-op, not an error.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> CartEvent {
        self.state.cart.retain(|line| &line.product.id != product_id);
        self.persist();
        CartEvent::RemovedFromCart
    }

    /// Set the line's quantity exactly. A quantity of zero is equivalent
    /// to [`Self::remove_from_cart`].
    ///
    /// The bound is the stock captured when the line was created, not a
    /// live re-fetch.
    ///
    /// # Errors
    ///
    /// [`CartRejection::NotInCart`] if no line exists for the product,
    /// [`CartRejection::StockExceeded`] if the quantity exceeds the
    /// captured stock.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartEvent, CartRejection> {
        if quantity == 0 {
            return Ok(self.remove_from_cart(product_id));
        }

        let Some(line) = self
            .state
            .cart
            .iter_mut()
            .find(|line| &line.product.id == product_id)
        else {
            return Err(CartRejection::NotInCart);
        };

        if let Some(stock) = line.product.stock
            && quantity > stock
        {
            return Err(CartRejection::StockExceeded { stock });
        }

        line.quantity = quantity;
        self.persist();
        Ok(CartEvent::QuantitySet { quantity })
    }

    /// Empty the line sequence. The wishlist is untouched.
    pub fn clear_cart(&mut self) -> CartEvent {
        self.state.cart.clear();
        self.persist();
        CartEvent::CartCleared
    }

    // =========================================================================
    // Wishlist mutations
    // =========================================================================

    /// Add `product` to the wishlist.
    ///
    /// Adding an already-present product is a no-op event, not an error.
    ///
    /// # Errors
    ///
    /// [`CartRejection::OutOfStock`] if the product reports zero stock.
    pub fn add_to_wishlist(&mut self, product: &Product) -> Result<CartEvent, CartRejection> {
        if product.is_out_of_stock() {
            return Err(CartRejection::OutOfStock);
        }
        if self.is_in_wishlist(&product.id) {
            return Ok(CartEvent::AlreadyInWishlist);
        }

        self.state.wishlist.push(product.clone());
        self.persist();
        Ok(CartEvent::AddedToWishlist)
    }

    /// Remove `product_id` from the wishlist. Removing a non-member is a
    /// no-op.
    pub fn remove_from_wishlist(&mut self, product_id: &ProductId) -> CartEvent {
        self.state.wishlist.retain(|p| &p.id != product_id);
        self.persist();
        CartEvent::RemovedFromWishlist
    }

    // =========================================================================
    // Derived aggregates
    // =========================================================================

    /// Sum of `price x quantity` over all lines, using captured prices.
    ///
    /// Captured prices keep checkout totals stable even if the catalog
    /// changes mid-session.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.state.subtotal()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn cart_items_count(&self) -> u32 {
        self.state.items_count()
    }

    /// Pure membership test against the wishlist.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.state.wishlist.iter().any(|p| &p.id == product_id)
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.state.cart
    }

    /// The wishlist entries in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> &[Product] {
        &self.state.wishlist
    }

    /// An immutable copy of the current state, for checkout.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.state.clone()
    }

    /// Write-behind persistence. A failed write degrades durability across
    /// restarts, never the current session, so it is logged and swallowed.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            tracing::warn!("Failed to persist cart snapshot: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::store::StoreError;

    /// In-memory store standing in for the durable blob.
    #[derive(Default)]
    struct MemoryStore {
        blob: RefCell<Option<CartSnapshot>>,
    }

    impl SnapshotStore for MemoryStore {
        fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
            Ok(self.blob.borrow().clone())
        }

        fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
            *self.blob.borrow_mut() = Some(snapshot.clone());
            Ok(())
        }
    }

    /// Store whose writes always fail, for the degraded-durability path.
    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }

        fn save(&self, _snapshot: &CartSnapshot) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }
    }

    fn product(id: &str, price: Decimal, stock: Option<u32>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            stock,
            category: "test".to_string(),
            image: String::new(),
            rating: 4.0,
            review_count: 7,
        }
    }

    fn engine() -> CartEngine<MemoryStore> {
        CartEngine::load(MemoryStore::default())
    }

    #[test]
    fn test_add_inserts_line_with_quantity_one() {
        let mut engine = engine();
        let p = product("p-1", Decimal::new(2000, 2), Some(5));

        assert_eq!(engine.add_to_cart(&p), Ok(CartEvent::AddedToCart));
        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.lines()[0].quantity, 1);
    }

    #[test]
    fn test_repeated_adds_saturate_at_stock() {
        let mut engine = engine();
        let p = product("p-1", Decimal::new(100, 2), Some(3));

        assert_eq!(engine.add_to_cart(&p), Ok(CartEvent::AddedToCart));
        assert_eq!(
            engine.add_to_cart(&p),
            Ok(CartEvent::QuantityIncremented { quantity: 2 })
        );
        assert_eq!(
            engine.add_to_cart(&p),
            Ok(CartEvent::QuantityIncremented { quantity: 3 })
        );
        // The (s+1)th call is rejected and the line stays at s.
        assert_eq!(
            engine.add_to_cart(&p),
            Err(CartRejection::StockExceeded { stock: 3 })
        );
        assert_eq!(engine.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_out_of_stock_is_rejected_without_state_change() {
        let mut engine = engine();
        let p = product("p-1", Decimal::new(100, 2), Some(0));

        assert_eq!(engine.add_to_cart(&p), Err(CartRejection::OutOfStock));
        assert!(engine.lines().is_empty());
    }

    #[test]
    fn test_unknown_stock_has_no_upper_bound() {
        let mut engine = engine();
        let p = product("p-1", Decimal::new(100, 2), None);

        for _ in 0..50 {
            engine.add_to_cart(&p).unwrap();
        }
        assert_eq!(engine.lines()[0].quantity, 50);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut engine = engine();
        let p = product("p-1", Decimal::new(100, 2), Some(5));
        engine.add_to_cart(&p).unwrap();

        assert_eq!(
            engine.update_quantity(&p.id, 0),
            Ok(CartEvent::RemovedFromCart)
        );
        assert!(engine.lines().is_empty());
    }

    #[test]
    fn test_update_quantity_bounded_by_captured_stock() {
        let mut engine = engine();
        let p = product("p-1", Decimal::new(100, 2), Some(4));
        engine.add_to_cart(&p).unwrap();

        assert_eq!(
            engine.update_quantity(&p.id, 5),
            Err(CartRejection::StockExceeded { stock: 4 })
        );
        assert_eq!(engine.lines()[0].quantity, 1);

        assert_eq!(
            engine.update_quantity(&p.id, 4),
            Ok(CartEvent::QuantitySet { quantity: 4 })
        );
        assert_eq!(engine.lines()[0].quantity, 4);
    }

    #[test]
    fn test_update_quantity_on_absent_line_is_rejected() {
        let mut engine = engine();
        assert_eq!(
            engine.update_quantity(&ProductId::new("ghost"), 2),
            Err(CartRejection::NotInCart)
        );
    }

    #[test]
    fn test_remove_absent_line_is_a_no_op() {
        let mut engine = engine();
        assert_eq!(
            engine.remove_from_cart(&ProductId::new("ghost")),
            CartEvent::RemovedFromCart
        );
        assert!(engine.lines().is_empty());
    }

    #[test]
    fn test_total_reflects_captured_prices_not_live_prices() {
        let mut engine = engine();
        let p = product("p-1", Decimal::new(2000, 2), Some(10));
        engine.add_to_cart(&p).unwrap();
        engine.add_to_cart(&p).unwrap();

        // The catalog price changes mid-session; the increment still books
        // against the captured line.
        let repriced = product("p-1", Decimal::new(9900, 2), Some(10));
        engine.add_to_cart(&repriced).unwrap();

        assert_eq!(engine.cart_total(), Decimal::new(6000, 2));
    }

    #[test]
    fn test_total_and_count_over_mixed_lines() {
        let mut engine = engine();
        engine
            .add_to_cart(&product("p-1", Decimal::new(2000, 2), Some(5)))
            .unwrap();
        engine
            .add_to_cart(&product("p-1", Decimal::new(2000, 2), Some(5)))
            .unwrap();
        engine
            .add_to_cart(&product("p-2", Decimal::new(500, 2), Some(5)))
            .unwrap();

        assert_eq!(engine.cart_total(), Decimal::new(4500, 2));
        assert_eq!(engine.cart_items_count(), 3);
    }

    #[test]
    fn test_lines_preserve_insertion_order() {
        let mut engine = engine();
        for id in ["p-3", "p-1", "p-2"] {
            engine
                .add_to_cart(&product(id, Decimal::ONE, Some(5)))
                .unwrap();
        }
        let ids: Vec<&str> = engine
            .lines()
            .iter()
            .map(|line| line.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p-3", "p-1", "p-2"]);
    }

    #[test]
    fn test_clear_cart_leaves_wishlist() {
        let mut engine = engine();
        let p = product("p-1", Decimal::ONE, Some(5));
        engine.add_to_cart(&p).unwrap();
        engine.add_to_wishlist(&p).unwrap();

        assert_eq!(engine.clear_cart(), CartEvent::CartCleared);
        assert!(engine.lines().is_empty());
        assert_eq!(engine.wishlist().len(), 1);
    }

    #[test]
    fn test_wishlist_membership_is_idempotent() {
        let mut engine = engine();
        let p = product("p-1", Decimal::ONE, Some(5));

        assert_eq!(engine.add_to_wishlist(&p), Ok(CartEvent::AddedToWishlist));
        assert_eq!(engine.add_to_wishlist(&p), Ok(CartEvent::AlreadyInWishlist));
        assert_eq!(engine.wishlist().len(), 1);
        assert!(engine.is_in_wishlist(&p.id));
    }

    #[test]
    fn test_wishlist_rejects_out_of_stock() {
        let mut engine = engine();
        let p = product("p-1", Decimal::ONE, Some(0));

        assert_eq!(engine.add_to_wishlist(&p), Err(CartRejection::OutOfStock));
        assert!(engine.wishlist().is_empty());
    }

    #[test]
    fn test_wishlist_remove_non_member_is_a_no_op() {
        let mut engine = engine();
        assert_eq!(
            engine.remove_from_wishlist(&ProductId::new("ghost")),
            CartEvent::RemovedFromWishlist
        );
    }

    #[test]
    fn test_every_mutation_reaches_the_store() {
        let store = MemoryStore::default();
        let mut engine = CartEngine::load(store);
        let p = product("p-1", Decimal::new(100, 2), Some(5));

        engine.add_to_cart(&p).unwrap();
        let persisted = engine.store.blob.borrow().clone().unwrap();
        assert_eq!(persisted.cart.len(), 1);

        engine.update_quantity(&p.id, 3).unwrap();
        let persisted = engine.store.blob.borrow().clone().unwrap();
        assert_eq!(persisted.cart[0].quantity, 3);
    }

    #[test]
    fn test_rejected_mutation_does_not_persist() {
        let store = MemoryStore::default();
        let mut engine = CartEngine::load(store);
        let p = product("p-1", Decimal::new(100, 2), Some(0));

        assert!(engine.add_to_cart(&p).is_err());
        assert!(engine.store.blob.borrow().is_none());
    }

    #[test]
    fn test_store_failure_never_fails_the_mutation() {
        let mut engine = CartEngine::load(FailingStore);
        let p = product("p-1", Decimal::new(100, 2), Some(5));

        // Load failed, engine starts empty; the write fails too, yet the
        // in-memory state stays authoritative.
        assert_eq!(engine.add_to_cart(&p), Ok(CartEvent::AddedToCart));
        assert_eq!(engine.cart_items_count(), 1);
    }

    #[test]
    fn test_rehydration_restores_prior_state() {
        let store = MemoryStore::default();
        {
            let mut engine = CartEngine::load(&store);
            engine
                .add_to_cart(&product("p-1", Decimal::new(2000, 2), Some(5)))
                .unwrap();
            engine
                .add_to_wishlist(&product("p-2", Decimal::new(500, 2), Some(3)))
                .unwrap();
        }

        let engine = CartEngine::load(&store);
        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.wishlist().len(), 1);
    }
}
