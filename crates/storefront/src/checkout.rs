//! Checkout orchestration.
//!
//! A state machine over a single checkout attempt:
//! `Idle -> AddressLoaded -> Submitting -> {Completed | Failed}`.
//!
//! The orchestrator composes a snapshot of the cart, a selected address,
//! and freshly computed totals into an order-creation request, and hands
//! the snapshot off exactly once. It never mutates cart state directly:
//! on success it instructs the engine to clear.

use rust_decimal::Decimal;
use thiserror::Error;

use shophub_core::{Address, AddressId, NewAddress, OrderDraft, OrderId, UserId};

use crate::api::ApiError;
use crate::cart::CartEngine;
use crate::store::SnapshotStore;

/// Flat tax rate applied at submission time (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Nothing loaded yet.
    Idle,
    /// Saved addresses fetched; submission is allowed once one is selected.
    AddressLoaded,
    /// An order submission is in flight; further submissions are refused.
    Submitting,
    /// The order was durably created and the local cart cleared.
    Completed,
    /// The backend rejected the submission before an order id was
    /// obtained. Cart and selection are untouched; resubmission is safe.
    Failed,
}

/// Errors raised by the checkout orchestrator.
///
/// The first four are caller errors: submission must not be attempted and
/// no network call is made. `Backend` is a transient failure, safe to
/// retry because no partial local state was committed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No shipping address selected")]
    NoAddressSelected,

    #[error("Address {0} is not among the loaded addresses")]
    UnknownAddress(AddressId),

    #[error("An order submission is already in flight")]
    SubmissionInFlight,

    #[error("Backend error: {0}")]
    Backend(#[from] ApiError),
}

/// Backend operations the orchestrator depends on.
///
/// `StorefrontApi` implements this; tests substitute stubs.
#[allow(async_fn_in_trait)]
pub trait CheckoutBackend {
    /// Fetch the user's saved addresses.
    async fn fetch_addresses(&self, user_id: &UserId) -> Result<Vec<Address>, ApiError>;

    /// Create a new address, returning it with its assigned id.
    async fn create_address(
        &self,
        user_id: &UserId,
        address: NewAddress,
    ) -> Result<Address, ApiError>;

    /// Submit an order draft, returning the assigned order id.
    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderId, ApiError>;

    /// Clear the server-side mirrored cart.
    async fn clear_cart_mirror(&self, user_id: &UserId) -> Result<(), ApiError>;
}

/// Orchestrates a single checkout attempt for one user.
pub struct CheckoutFlow<B> {
    backend: B,
    user_id: UserId,
    phase: CheckoutPhase,
    addresses: Vec<Address>,
    selected: Option<AddressId>,
}

impl<B: CheckoutBackend> CheckoutFlow<B> {
    /// Start a checkout attempt in the `Idle` phase.
    #[must_use]
    pub const fn new(backend: B, user_id: UserId) -> Self {
        Self {
            backend,
            user_id,
            phase: CheckoutPhase::Idle,
            addresses: Vec::new(),
            selected: None,
        }
    }

    /// Current phase of the attempt.
    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Addresses loaded for the user, in backend order.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// The currently selected address, if any.
    #[must_use]
    pub fn selected_address(&self) -> Option<&Address> {
        let selected = self.selected.as_ref()?;
        self.addresses.iter().find(|a| &a.id == selected)
    }

    /// Whether submission is blocked until an address is created.
    #[must_use]
    pub fn needs_address(&self) -> bool {
        self.phase == CheckoutPhase::AddressLoaded && self.addresses.is_empty()
    }

    /// Fetch the user's saved addresses and auto-select the first one.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Backend` on fetch failure; the phase is
    /// left unchanged so the caller can retry.
    pub async fn load_addresses(&mut self) -> Result<&[Address], CheckoutError> {
        let addresses = self.backend.fetch_addresses(&self.user_id).await?;
        self.selected = addresses.first().map(|a| a.id.clone());
        self.addresses = addresses;
        self.phase = CheckoutPhase::AddressLoaded;
        Ok(&self.addresses)
    }

    /// Create a new address through the backend and select it.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Backend` on creation failure; the loaded
    /// list and selection are unchanged.
    pub async fn add_address(&mut self, address: NewAddress) -> Result<AddressId, CheckoutError> {
        let created = self.backend.create_address(&self.user_id, address).await?;
        let id = created.id.clone();
        self.addresses.push(created);
        self.selected = Some(id.clone());
        if self.phase == CheckoutPhase::Idle {
            self.phase = CheckoutPhase::AddressLoaded;
        }
        Ok(id)
    }

    /// Select one of the loaded addresses.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownAddress` for an id that is not among
    /// the loaded addresses.
    pub fn select_address(&mut self, id: AddressId) -> Result<(), CheckoutError> {
        if self.addresses.iter().any(|a| a.id == id) {
            self.selected = Some(id);
            Ok(())
        } else {
            Err(CheckoutError::UnknownAddress(id))
        }
    }

    /// Submit the order: snapshot the cart, compute totals, create the
    /// order, then clear the mirrored and local carts.
    ///
    /// Preconditions (checked before any network call, phase untouched):
    /// a non-empty cart and a selected address among those loaded. The
    /// mirrored-cart clear is best-effort; the local clear is
    /// unconditional once an order id exists, because the order is the
    /// durable source of truth.
    ///
    /// # Errors
    ///
    /// Caller errors (`EmptyCart`, `NoAddressSelected`,
    /// `SubmissionInFlight`) leave everything untouched. A backend
    /// rejection moves the attempt to `Failed` with the cart intact.
    pub async fn submit<S: SnapshotStore>(
        &mut self,
        engine: &mut CartEngine<S>,
    ) -> Result<OrderId, CheckoutError> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }

        let snapshot = engine.snapshot();
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let address = self
            .selected_address()
            .ok_or(CheckoutError::NoAddressSelected)?
            .clone();

        self.phase = CheckoutPhase::Submitting;

        // Recomputed fresh from the snapshot, never cached from an
        // earlier render.
        let subtotal = snapshot.subtotal();
        let tax = (subtotal * TAX_RATE).round_dp(2);
        let total = subtotal + tax;

        let draft = OrderDraft {
            user_id: self.user_id.clone(),
            items: snapshot.cart,
            address,
            subtotal,
            tax,
            total,
        };

        let order_id = match self.backend.submit_order(&draft).await {
            Ok(id) => id,
            Err(e) => {
                self.phase = CheckoutPhase::Failed;
                return Err(e.into());
            }
        };

        // The order is durably created; a failed mirror clear is logged
        // and never blocks the user-visible success.
        if let Err(e) = self.backend.clear_cart_mirror(&self.user_id).await {
            tracing::warn!("Failed to clear mirrored cart after order {order_id}: {e}");
        }

        engine.clear_cart();
        self.phase = CheckoutPhase::Completed;
        Ok(order_id)
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: CheckoutPhase) {
        self.phase = phase;
    }
}
