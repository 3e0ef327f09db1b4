//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Status transitions:
/// ```text
/// WaitingPayment ──► WaitingDelivery ──► Delivered
///        │                  │                │
///        └──────────────────┴────────────────┴──► Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order was placed and awaits payment.
    #[default]
    WaitingPayment,

    /// Payment received, order is awaiting delivery.
    WaitingDelivery,

    /// Order reached the customer (terminal state).
    Delivered,

    /// Order was canceled (terminal state).
    Canceled,
}

impl OrderStatus {
    /// Returns true if payment can be accepted in this status.
    pub fn can_pay(&self) -> bool {
        matches!(self, OrderStatus::WaitingPayment)
    }

    /// Returns true if the order can be marked delivered in this status.
    pub fn can_deliver(&self) -> bool {
        matches!(self, OrderStatus::WaitingDelivery)
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::WaitingPayment => "WaitingPayment",
            OrderStatus::WaitingDelivery => "WaitingDelivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
