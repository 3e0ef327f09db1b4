use serde::{Deserialize, Serialize};

/// Customer placing an order.
///
/// The order only checks that a customer is present. Deeper customer
/// validation belongs to the registration side of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
