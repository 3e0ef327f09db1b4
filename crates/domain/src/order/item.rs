//! Order line item.

use serde::{Deserialize, Serialize};

use crate::contract::Contract;
use crate::entities::Product;
use crate::money::Money;
use crate::notification::Ledger;

/// A line in an order: a product snapshot, the unit price captured at
/// construction time, and a quantity.
///
/// An item built from bad input (absent product, negative quantity) still
/// exists but carries notifications on its ledger. Callers check
/// [`OrderItem::is_valid`] instead of relying on construction failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(skip)]
    ledger: Ledger,
    product: Option<Product>,
    unit_price: Money,
    quantity: i32,
}

impl OrderItem {
    /// Builds a line item, capturing the product's current price.
    ///
    /// A missing product yields a zero unit price and a notification;
    /// a negative quantity yields a notification.
    pub fn new(product: Option<Product>, quantity: i32) -> Self {
        let mut ledger = Ledger::new();
        ledger.add_all(
            Contract::new()
                .is_some(&product, "product", "product is required")
                .is_at_least(quantity, 0, "quantity", "quantity must be zero or greater")
                .into_notifications(),
        );

        let unit_price = product.as_ref().map(|p| p.price).unwrap_or_default();

        Self {
            ledger,
            product,
            unit_price,
            quantity,
        }
    }

    /// Returns the product snapshot, if one was supplied.
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Returns the unit price captured at construction.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the ordered quantity.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Returns the item's validation ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// True iff construction recorded no notifications.
    pub fn is_valid(&self) -> bool {
        self.ledger.is_valid()
    }

    /// Line total: unit price times quantity.
    pub fn total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
