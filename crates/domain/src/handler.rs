//! Create-order use case orchestration.

use common::ProductId;

use crate::command::{CommandResult, CreateOrderCommand};
use crate::notification::{Ledger, Notification};
use crate::order::Order;
use crate::repository::{
    CustomerRepository, DeliveryFeeRepository, DiscountRepository, OrderRepository,
    ProductRepository, RepositoryError,
};

/// Orchestrates the create-order use case over the repository
/// collaborators.
///
/// Carries its own ledger so command-level and aggregate-level failures
/// end up aggregated in one place. Validation failures come back inside
/// the [`CommandResult`] envelope; only fatal repository failures
/// surface as `Err`.
pub struct OrderHandler<C, F, D, P, O> {
    customers: C,
    delivery_fees: F,
    discounts: D,
    products: P,
    orders: O,
    ledger: Ledger,
}

impl<C, F, D, P, O> OrderHandler<C, F, D, P, O>
where
    C: CustomerRepository,
    F: DeliveryFeeRepository,
    D: DiscountRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    /// Creates a handler over the five collaborators.
    pub fn new(customers: C, delivery_fees: F, discounts: D, products: P, orders: O) -> Self {
        Self {
            customers,
            delivery_fees,
            discounts,
            products,
            orders,
            ledger: Ledger::new(),
        }
    }

    /// Returns the handler's aggregated validation ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// True iff no handled command has recorded a generation failure.
    pub fn is_valid(&self) -> bool {
        self.ledger.is_valid()
    }

    /// Returns the aggregated failure notifications.
    pub fn notifications(&self) -> &[Notification] {
        self.ledger.notifications()
    }

    /// Runs the create-order use case.
    ///
    /// Validates the command first and returns the "invalid order"
    /// envelope without touching any repository when it fails. Otherwise
    /// resolves the collaborators, assembles the order, aggregates every
    /// notification, and persists exactly once on full success.
    #[tracing::instrument(skip(self, command))]
    pub async fn handle(
        &mut self,
        mut command: CreateOrderCommand,
    ) -> Result<CommandResult, RepositoryError> {
        command.validate();
        if !command.is_valid() {
            metrics::counter!("orders_rejected_total").increment(1);
            tracing::debug!(
                failures = command.notifications().len(),
                "command rejected before lookup"
            );
            return Ok(CommandResult::failed(
                "invalid order",
                command.notifications().to_vec(),
            ));
        }

        let customer = self.customers.get(command.customer()).await?;
        let delivery_fee = self.delivery_fees.get(command.zip_code()).await?;
        let discount = match command.promo_code() {
            Some(code) => self.discounts.get(code).await?,
            None => None,
        };

        let wanted = distinct_product_ids(&command);
        let products = self.products.get(&wanted).await?;

        let mut order = Order::new(customer, delivery_fee, discount);
        for item in command.items() {
            let product = products.iter().find(|p| p.id == item.product).cloned();
            order.add_item(product, item.quantity);
        }

        self.ledger.merge(order.ledger());

        if !self.ledger.is_valid() {
            metrics::counter!("orders_rejected_total").increment(1);
            return Ok(CommandResult::failed(
                "order generation failed",
                self.ledger.notifications().to_vec(),
            ));
        }

        self.orders.save(&order).await?;
        metrics::counter!("orders_generated_total").increment(1);
        tracing::info!(number = %order.number(), total_cents = order.total().cents(), "order generated");

        let message = format!("order {} generated successfully", order.number());
        Ok(CommandResult::succeeded(message, order))
    }
}

/// The distinct product identifiers referenced by a command, in first
/// appearance order.
fn distinct_product_ids(command: &CreateOrderCommand) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = Vec::with_capacity(command.items().len());
    for item in command.items() {
        if !ids.contains(&item.product) {
            ids.push(item.product);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CreateOrderItemCommand;

    #[test]
    fn distinct_ids_preserve_first_appearance_order() {
        let a = ProductId::new();
        let b = ProductId::new();
        let command = CreateOrderCommand::new(
            "123456789012",
            "0456405",
            None,
            vec![
                CreateOrderItemCommand::new(a, 1),
                CreateOrderItemCommand::new(b, 2),
                CreateOrderItemCommand::new(a, 3),
            ],
        );

        assert_eq!(distinct_product_ids(&command), vec![a, b]);
    }
}
