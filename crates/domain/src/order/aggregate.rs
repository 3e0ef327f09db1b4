//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::OrderNumber;
use serde::{Deserialize, Serialize};

use crate::contract::Contract;
use crate::entities::{Customer, Discount, Product};
use crate::money::Money;
use crate::notification::{Ledger, Notification};

use super::{OrderItem, OrderStatus};

/// Order aggregate root.
///
/// Owns the pricing logic and the status state machine. Invalid input
/// never panics or errors here: a missing customer marks the order
/// invalid on its ledger, and bad line items are silently rejected by
/// [`Order::add_item`] so a lenient UI can submit partial garbage and
/// still get one aggregated answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    number: OrderNumber,
    #[serde(skip)]
    ledger: Ledger,
    customer: Option<Customer>,
    status: OrderStatus,
    delivery_fee: Money,
    discount: Option<Discount>,
    items: Vec<OrderItem>,
    paid: Option<Money>,
}

impl Order {
    /// Creates a new order in `WaitingPayment` with a fresh 8-character
    /// number.
    ///
    /// An absent customer is recorded on the ledger; the order is still
    /// returned and callers must check [`Order::is_valid`].
    pub fn new(customer: Option<Customer>, delivery_fee: Money, discount: Option<Discount>) -> Self {
        let mut ledger = Ledger::new();
        ledger.add_all(
            Contract::new()
                .is_some(&customer, "customer", "customer is required")
                .into_notifications(),
        );

        Self {
            number: OrderNumber::generate(),
            ledger,
            customer,
            status: OrderStatus::WaitingPayment,
            delivery_fee,
            discount,
            items: Vec::new(),
            paid: None,
        }
    }
}

// Query methods
impl Order {
    /// Returns the order number.
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Returns the customer, when present.
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the flat delivery fee.
    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    /// Returns the attached discount, when present.
    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    /// Returns the line items in the order they were added.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the amount tendered by [`Order::pay`], when any.
    pub fn paid(&self) -> Option<Money> {
        self.paid
    }

    /// Returns the order's validation ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// True iff no notification has been recorded on the order.
    pub fn is_valid(&self) -> bool {
        self.ledger.is_valid()
    }

    /// Sum of the line totals, zero for an empty order.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Recomputes the order total from current state.
    ///
    /// `subtotal + delivery fee - effective discount`, where an expired
    /// or absent discount contributes zero. Never cached, never clamped.
    pub fn total(&self) -> Money {
        self.total_at(Utc::now())
    }

    /// [`Order::total`] evaluated against an explicit instant, for
    /// deterministic pricing checks.
    pub fn total_at(&self, at: DateTime<Utc>) -> Money {
        let discount = self
            .discount
            .as_ref()
            .map(|d| d.value_at(at))
            .unwrap_or_default();
        self.subtotal() + self.delivery_fee - discount
    }
}

// Transition methods
impl Order {
    /// Appends a line for `quantity` units of `product`.
    ///
    /// Returns without mutating when the product is absent or the
    /// quantity is not positive. The item's own notifications are merged
    /// into the order's ledger before the item is appended.
    pub fn add_item(&mut self, product: Option<Product>, quantity: i32) {
        if product.is_none() || quantity <= 0 {
            return;
        }

        let item = OrderItem::new(product, quantity);
        self.ledger.merge(item.ledger());
        self.items.push(item);
    }

    /// Accepts payment and moves the order to `WaitingDelivery`.
    ///
    /// The tendered amount is stored for later reconciliation; it is not
    /// compared against [`Order::total`] here. Outside `WaitingPayment`
    /// the attempt is recorded as a notification and the status is left
    /// unchanged.
    pub fn pay(&mut self, amount: Money) {
        if !self.status.can_pay() {
            self.ledger.add(Notification::new(
                "status",
                format!("order {} cannot be paid while {}", self.number, self.status),
            ));
            return;
        }

        self.paid = Some(amount);
        self.status = OrderStatus::WaitingDelivery;
    }

    /// Marks the order delivered.
    ///
    /// Valid only from `WaitingDelivery`; otherwise the attempt is
    /// recorded as a notification and the status is left unchanged.
    pub fn deliver(&mut self) {
        if !self.status.can_deliver() {
            self.ledger.add(Notification::new(
                "status",
                format!(
                    "order {} cannot be delivered while {}",
                    self.number, self.status
                ),
            ));
            return;
        }

        self.status = OrderStatus::Delivered;
    }

    /// Cancels the order unconditionally, whatever the current status.
    pub fn cancel(&mut self) {
        self.status = OrderStatus::Canceled;
    }
}
