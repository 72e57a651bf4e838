//! Order types and lifecycle status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Address, CartLine, OrderId, UserId};

/// Order lifecycle status.
///
/// Status is the only order field that changes after creation, and only
/// through the admin reconciliation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "On Process")]
    OnProcess,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::OnProcess, Self::Shipped, Self::Delivered];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnProcess => write!(f, "On Process"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "On Process" => Ok(Self::OnProcess),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// A placed order.
///
/// `items`, `address`, and the totals are immutable once created; only
/// `status` may change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Snapshot copy of the cart lines at submission time.
    pub items: Vec<CartLine>,
    /// Snapshot copy of the selected shipping address.
    pub address: Address,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An order-creation request composed at checkout submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: UserId,
    pub items: Vec<CartLine>,
    pub address: Address,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}
