use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Flat promotional discount with an expiry instant.
///
/// The amount is a flat monetary subtraction, not a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub amount: Money,
    pub expires_at: DateTime<Utc>,
}

impl Discount {
    /// Creates a new discount.
    pub fn new(amount: Money, expires_at: DateTime<Utc>) -> Self {
        Self { amount, expires_at }
    }

    /// True while `at` is before the expiry instant.
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        at < self.expires_at
    }

    /// The reduction this discount contributes at `at`: the full amount
    /// while unexpired, zero afterwards.
    pub fn value_at(&self, at: DateTime<Utc>) -> Money {
        if self.is_valid_at(at) {
            self.amount
        } else {
            Money::zero()
        }
    }
}
