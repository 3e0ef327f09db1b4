//! Validation notifications and the ledger that collects them.
//!
//! Expected validation failures are never errors in this system. Each
//! failure becomes a [`Notification`] appended to the owning entity's
//! [`Ledger`], so a single response can report every problem at once
//! instead of stopping at the first.

use serde::{Deserialize, Serialize};

/// A single validation failure: the offending field plus a human-readable
/// message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    field: String,
    message: String,
}

impl Notification {
    /// Creates a new notification.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the field the failure refers to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the human-readable failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered collection of notifications owned by a validated entity.
///
/// Embedded by composition in every entity that validates itself. Child
/// entity ledgers are merged upward explicitly via [`Ledger::merge`],
/// never automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    notifications: Vec<Notification>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one notification.
    pub fn add(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Appends notifications in iteration order.
    pub fn add_all(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        self.notifications.extend(notifications);
    }

    /// Copies another ledger's notifications onto this one, preserving
    /// their order.
    pub fn merge(&mut self, other: &Ledger) {
        self.notifications.extend_from_slice(&other.notifications);
    }

    /// True iff no notification has been recorded.
    pub fn is_valid(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Returns the recorded notifications in append order.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_is_valid() {
        assert!(Ledger::new().is_valid());
    }

    #[test]
    fn add_preserves_call_order() {
        let mut ledger = Ledger::new();
        ledger.add(Notification::new("a", "first"));
        ledger.add(Notification::new("b", "second"));

        let fields: Vec<&str> = ledger.notifications().iter().map(|n| n.field()).collect();
        assert_eq!(fields, ["a", "b"]);
        assert!(!ledger.is_valid());
    }

    #[test]
    fn merge_appends_after_existing_entries() {
        let mut parent = Ledger::new();
        parent.add(Notification::new("parent", "own failure"));

        let mut child = Ledger::new();
        child.add(Notification::new("child", "nested failure"));

        parent.merge(&child);

        let fields: Vec<&str> = parent.notifications().iter().map(|n| n.field()).collect();
        assert_eq!(fields, ["parent", "child"]);
    }

    #[test]
    fn merge_of_valid_ledger_keeps_validity() {
        let mut parent = Ledger::new();
        parent.merge(&Ledger::new());
        assert!(parent.is_valid());
    }

    #[test]
    fn notification_serialization_roundtrip() {
        let notification = Notification::new("zip_code", "zip code is too long");
        let json = serde_json::to_string(&notification).unwrap();
        let deserialized: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(notification, deserialized);
    }
}
