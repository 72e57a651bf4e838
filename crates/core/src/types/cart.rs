//! Cart line and snapshot types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Product;

/// One product entry in the cart with a quantity.
///
/// The product fields are captured at add time; the invariant
/// `1 <= quantity <= stock` holds whenever the captured stock is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price x quantity for this line, using the captured price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// An immutable copy of the cart and wishlist at a point in time.
///
/// This is both the durable blob written by the persistence adapter and
/// the snapshot handed to checkout, decoupling order computation from
/// subsequent live mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub cart: Vec<CartLine>,
    #[serde(default)]
    pub wishlist: Vec<Product>,
}

impl CartSnapshot {
    /// Sum of `price x quantity` over all lines, using captured prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn items_count(&self) -> u32 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart holds no lines (the wishlist is not considered).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            stock: Some(10),
            category: "test".to_string(),
            image: String::new(),
            rating: 4.0,
            review_count: 2,
        }
    }

    #[test]
    fn test_line_total_uses_captured_price() {
        let line = CartLine {
            product: product("p-1", Decimal::new(2000, 2)),
            quantity: 3,
        };
        assert_eq!(line.line_total(), Decimal::new(6000, 2));
    }

    #[test]
    fn test_snapshot_subtotal_and_count() {
        let snapshot = CartSnapshot {
            cart: vec![
                CartLine {
                    product: product("p-1", Decimal::new(2000, 2)),
                    quantity: 2,
                },
                CartLine {
                    product: product("p-2", Decimal::new(500, 2)),
                    quantity: 1,
                },
            ],
            wishlist: vec![],
        };
        assert_eq!(snapshot.subtotal(), Decimal::new(4500, 2));
        assert_eq!(snapshot.items_count(), 3);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_line_serializes_with_flattened_product() {
        let line = CartLine {
            product: product("p-1", Decimal::new(999, 2)),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        // Flat shape: product fields and quantity at the same level.
        assert_eq!(json["id"], "p-1");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_empty_blob_deserializes_to_default() {
        let snapshot: CartSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, CartSnapshot::default());
        assert!(snapshot.is_empty());
    }
}
