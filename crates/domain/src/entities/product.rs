use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Catalog product.
///
/// Treated as an immutable snapshot: a line item copies the price at the
/// moment it is built, so later catalog changes never reprice an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub active: bool,
}

impl Product {
    /// Creates a new product with a generated identifier.
    pub fn new(name: impl Into<String>, price: Money, active: bool) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            price,
            active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Product::new("Keyboard", Money::from_dollars(10), true);
        let b = Product::new("Mouse", Money::from_dollars(5), true);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serialization_roundtrip() {
        let product = Product::new("Keyboard", Money::from_cents(9990), true);
        let json = serde_json::to_string(&product).unwrap();
        let deserialized: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product, deserialized);
    }
}
