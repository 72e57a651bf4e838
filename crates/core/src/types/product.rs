//! Catalog product type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A catalog product, as returned by the catalog backend.
///
/// Products are read-only from the storefront's perspective. Cart lines
/// capture a copy of the product at add time, so later catalog changes do
/// not affect totals already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Units available. `None` means the backend did not report stock.
    #[serde(default)]
    pub stock: Option<u32>,
    pub category: String,
    /// Primary image URL.
    pub image: String,
    /// Average review rating (0.0 - 5.0).
    pub rating: f64,
    pub review_count: u32,
}

impl Product {
    /// Whether the product is known to be out of stock.
    ///
    /// Unknown stock (`None`) is treated as available.
    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == Some(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(stock: Option<u32>) -> Product {
        Product {
            id: ProductId::new("p-1"),
            title: "Wireless Headphones".to_string(),
            price: Decimal::new(4999, 2),
            stock,
            category: "electronics".to_string(),
            image: "https://cdn.example.com/p-1.jpg".to_string(),
            rating: 4.4,
            review_count: 213,
        }
    }

    #[test]
    fn test_out_of_stock_only_when_explicitly_zero() {
        assert!(product(Some(0)).is_out_of_stock());
        assert!(!product(Some(3)).is_out_of_stock());
        assert!(!product(None).is_out_of_stock());
    }

    #[test]
    fn test_serde_camel_case_wire_format() {
        let json = serde_json::to_value(product(Some(5))).unwrap();
        assert_eq!(json["reviewCount"], 213);
        assert_eq!(json["stock"], 5);
    }

    #[test]
    fn test_missing_stock_deserializes_as_unknown() {
        let json = r#"{
            "id": "p-9",
            "title": "Mystery Box",
            "price": "12.00",
            "category": "misc",
            "image": "https://cdn.example.com/p-9.jpg",
            "rating": 3.0,
            "reviewCount": 1
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.stock, None);
        assert!(!p.is_out_of_stock());
    }
}
