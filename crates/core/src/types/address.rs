//! Shipping address types.

use serde::{Deserialize, Serialize};

use crate::types::{AddressId, UserId};

/// A saved shipping address owned by a user.
///
/// Addresses live in the address backend; the storefront holds at most a
/// transient selection (an id) during checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    /// Short label such as "Home" or "Office".
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
}

/// Fields for creating a new address; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
}

impl NewAddress {
    /// Attach a backend-assigned id and owner to produce an [`Address`].
    #[must_use]
    pub fn into_address(self, id: AddressId, user_id: UserId) -> Address {
        Address {
            id,
            user_id,
            label: self.label,
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            phone: self.phone,
        }
    }
}
