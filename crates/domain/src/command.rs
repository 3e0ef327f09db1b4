//! Create-order command DTOs and the result envelope.

use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::contract::Contract;
use crate::notification::{Ledger, Notification};
use crate::order::Order;

/// One requested line in a create-order command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderItemCommand {
    pub product: ProductId,
    pub quantity: i32,
}

impl CreateOrderItemCommand {
    /// Creates a new line request.
    pub fn new(product: ProductId, quantity: i32) -> Self {
        Self { product, quantity }
    }
}

/// Validated input DTO for the create-order use case.
///
/// Carries its own ledger, populated by [`CreateOrderCommand::validate`].
/// The identifier-length thresholds are business rules carried as given:
/// the customer document must be longer than 11 characters and the zip
/// code shorter than 8.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderCommand {
    customer: String,
    zip_code: String,
    promo_code: Option<String>,
    items: Vec<CreateOrderItemCommand>,
    #[serde(skip)]
    ledger: Ledger,
}

impl CreateOrderCommand {
    /// Creates a new command. Call [`CreateOrderCommand::validate`]
    /// before acting on it.
    pub fn new(
        customer: impl Into<String>,
        zip_code: impl Into<String>,
        promo_code: Option<String>,
        items: Vec<CreateOrderItemCommand>,
    ) -> Self {
        Self {
            customer: customer.into(),
            zip_code: zip_code.into(),
            promo_code,
            items,
            ledger: Ledger::new(),
        }
    }

    /// Runs the command's precondition contract, appending any failures
    /// to its ledger.
    pub fn validate(&mut self) {
        self.ledger.add_all(
            Contract::new()
                .is_longer_than(&self.customer, 11, "customer", "invalid customer document")
                .is_shorter_than(&self.zip_code, 8, "zip_code", "invalid zip code")
                .is_not_empty(&self.items, "items", "order has no items")
                .into_notifications(),
        );
    }

    /// Returns the customer document identifier.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Returns the delivery zip code.
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    /// Returns the promo code, when one was supplied.
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Returns the requested lines.
    pub fn items(&self) -> &[CreateOrderItemCommand] {
        &self.items
    }

    /// Returns the command's validation ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// True iff [`CreateOrderCommand::validate`] recorded no failures.
    pub fn is_valid(&self) -> bool {
        self.ledger.is_valid()
    }

    /// Returns the recorded validation failures.
    pub fn notifications(&self) -> &[Notification] {
        self.ledger.notifications()
    }
}

/// Payload of a [`CommandResult`]: the generated order on success, the
/// aggregated validation failures otherwise.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandData {
    Order(Box<Order>),
    Notifications(Vec<Notification>),
}

/// Success flag, message, and payload returned by the handler.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: CommandData,
}

impl CommandResult {
    /// Builds a success envelope carrying the generated order.
    pub fn succeeded(message: impl Into<String>, order: Order) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: CommandData::Order(Box::new(order)),
        }
    }

    /// Builds a failure envelope carrying the aggregated notifications.
    pub fn failed(message: impl Into<String>, notifications: Vec<Notification>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: CommandData::Notifications(notifications),
        }
    }

    /// Returns the generated order, when this is a success envelope.
    pub fn order(&self) -> Option<&Order> {
        match &self.data {
            CommandData::Order(order) => Some(order),
            CommandData::Notifications(_) => None,
        }
    }

    /// Returns the failure notifications, when this is a failure envelope.
    pub fn notifications(&self) -> Option<&[Notification]> {
        match &self.data {
            CommandData::Order(_) => None,
            CommandData::Notifications(notifications) => Some(notifications),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_item() -> Vec<CreateOrderItemCommand> {
        vec![CreateOrderItemCommand::new(ProductId::new(), 1)]
    }

    #[test]
    fn command_with_long_document_and_short_zip_is_valid() {
        let mut command =
            CreateOrderCommand::new("123456789012", "0456405", None, one_item());
        command.validate();
        assert!(command.is_valid());
    }

    #[test]
    fn document_of_eleven_characters_is_rejected() {
        let mut command = CreateOrderCommand::new("12345678901", "0456405", None, one_item());
        command.validate();
        assert!(!command.is_valid());
        assert_eq!(command.notifications()[0].field(), "customer");
    }

    #[test]
    fn zip_of_eight_characters_is_rejected() {
        let mut command =
            CreateOrderCommand::new("123456789012", "04564050", None, one_item());
        command.validate();
        assert!(!command.is_valid());
        assert_eq!(command.notifications()[0].field(), "zip_code");
    }

    #[test]
    fn command_without_items_is_rejected() {
        let mut command = CreateOrderCommand::new("123456789012", "0456405", None, vec![]);
        command.validate();
        assert!(!command.is_valid());
        assert_eq!(command.notifications()[0].field(), "items");
    }

    #[test]
    fn every_failure_is_reported_at_once() {
        let mut command = CreateOrderCommand::new("", "000000000", None, vec![]);
        command.validate();

        let fields: Vec<&str> = command.notifications().iter().map(|n| n.field()).collect();
        assert_eq!(fields, ["customer", "zip_code", "items"]);
    }

    #[test]
    fn command_deserializes_from_plain_json() {
        let id = ProductId::new();
        let json = serde_json::json!({
            "customer": "123456789012",
            "zip_code": "0456405",
            "promo_code": "PROMO10",
            "items": [{"product": id, "quantity": 2}],
        });

        let mut command: CreateOrderCommand = serde_json::from_value(json).unwrap();
        command.validate();

        assert!(command.is_valid());
        assert_eq!(command.promo_code(), Some("PROMO10"));
        assert_eq!(command.items()[0].product, id);
    }

    #[test]
    fn failure_envelope_serializes_notifications_as_array() {
        let result = CommandResult::failed(
            "invalid order",
            vec![Notification::new("customer", "invalid customer document")],
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"][0]["field"], "customer");
    }
}
