//! Integration tests for the create-order use case.
//!
//! These drive the handler end-to-end over the in-memory repositories,
//! checking the envelope contract, pricing, and the save-once rule.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::ProductId;
use domain::{
    CreateOrderCommand, CreateOrderItemCommand, Customer, CustomerRepository, Discount,
    InMemoryCustomerRepository, InMemoryDeliveryFeeRepository, InMemoryDiscountRepository,
    InMemoryOrderRepository, InMemoryProductRepository, Money, OrderHandler, OrderStatus, Product,
    RepositoryError,
};

const DOCUMENT: &str = "123456789012";
const ZIP: &str = "0456405";
const PROMO: &str = "PROMO10";

struct Fixture {
    customers: InMemoryCustomerRepository,
    delivery_fees: InMemoryDeliveryFeeRepository,
    discounts: InMemoryDiscountRepository,
    products: InMemoryProductRepository,
    orders: InMemoryOrderRepository,
    keyboard: Product,
}

impl Fixture {
    async fn seeded() -> Self {
        let customers = InMemoryCustomerRepository::new();
        customers
            .insert(DOCUMENT, Customer::new("Alice Santos", "alice@example.com"))
            .await;

        let delivery_fees = InMemoryDeliveryFeeRepository::new();
        delivery_fees.insert(ZIP, Money::from_dollars(10)).await;

        let discounts = InMemoryDiscountRepository::new();
        discounts
            .insert(
                PROMO,
                Discount::new(Money::from_dollars(10), Utc::now() + Duration::days(5)),
            )
            .await;

        let keyboard = Product::new("Keyboard", Money::from_dollars(10), true);
        let products = InMemoryProductRepository::new();
        products.insert(keyboard.clone()).await;

        Self {
            customers,
            delivery_fees,
            discounts,
            products,
            orders: InMemoryOrderRepository::new(),
            keyboard,
        }
    }

    fn handler(
        &self,
    ) -> OrderHandler<
        InMemoryCustomerRepository,
        InMemoryDeliveryFeeRepository,
        InMemoryDiscountRepository,
        InMemoryProductRepository,
        InMemoryOrderRepository,
    > {
        OrderHandler::new(
            self.customers.clone(),
            self.delivery_fees.clone(),
            self.discounts.clone(),
            self.products.clone(),
            self.orders.clone(),
        )
    }
}

mod success_path {
    use super::*;

    #[tokio::test]
    async fn valid_command_generates_and_saves_an_order() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            DOCUMENT,
            ZIP,
            Some(PROMO.to_string()),
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 5)],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(result.success);
        assert!(handler.is_valid());

        let order = result.order().expect("success envelope carries the order");
        assert_eq!(order.number().as_str().len(), 8);
        assert_eq!(order.status(), OrderStatus::WaitingPayment);
        assert_eq!(
            result.message,
            format!("order {} generated successfully", order.number())
        );

        // 5 x $10 + $10 fee - $10 discount
        assert_eq!(order.total(), Money::from_dollars(50));

        assert_eq!(fixture.orders.count().await, 1);
        let saved = fixture.orders.find(order.number()).await.unwrap();
        assert_eq!(saved.total(), Money::from_dollars(50));
    }

    #[tokio::test]
    async fn unknown_promo_code_means_no_discount() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            DOCUMENT,
            ZIP,
            Some("NOSUCH".to_string()),
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 5)],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(result.success);
        assert_eq!(result.order().unwrap().total(), Money::from_dollars(60));
    }

    #[tokio::test]
    async fn unknown_zip_code_means_zero_delivery_fee() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            DOCUMENT,
            "0000000",
            None,
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 5)],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(result.success);
        assert_eq!(result.order().unwrap().total(), Money::from_dollars(50));
    }

    #[tokio::test]
    async fn unresolvable_product_line_is_dropped_silently() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            DOCUMENT,
            ZIP,
            None,
            vec![
                CreateOrderItemCommand::new(fixture.keyboard.id, 2),
                CreateOrderItemCommand::new(ProductId::new(), 1),
            ],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(result.success);
        let order = result.order().unwrap();
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total(), Money::from_dollars(30));
    }

    #[tokio::test]
    async fn repeated_product_lines_each_become_an_item() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            DOCUMENT,
            ZIP,
            None,
            vec![
                CreateOrderItemCommand::new(fixture.keyboard.id, 2),
                CreateOrderItemCommand::new(fixture.keyboard.id, 3),
            ],
        );

        let result = handler.handle(command).await.unwrap();

        let order = result.order().unwrap();
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.subtotal(), Money::from_dollars(50));
    }
}

mod failure_path {
    use super::*;

    #[tokio::test]
    async fn short_customer_document_fails_fast() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            "00000000000",
            ZIP,
            None,
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 1)],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.message, "invalid order");
        assert_eq!(result.notifications().unwrap()[0].field(), "customer");
        assert_eq!(fixture.orders.count().await, 0);
    }

    #[tokio::test]
    async fn long_zip_code_fails_fast() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            DOCUMENT,
            "04564050",
            None,
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 1)],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.message, "invalid order");
    }

    #[tokio::test]
    async fn command_without_items_fails_fast() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(DOCUMENT, ZIP, None, vec![]);

        let result = handler.handle(command).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.notifications().unwrap()[0].field(), "items");
        assert_eq!(fixture.orders.count().await, 0);
    }

    #[tokio::test]
    async fn unknown_customer_fails_generation_and_saves_nothing() {
        let fixture = Fixture::seeded().await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            "999999999999",
            ZIP,
            None,
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 1)],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.message, "order generation failed");
        assert!(!handler.is_valid());
        assert_eq!(handler.notifications()[0].field(), "customer");
        assert_eq!(fixture.orders.count().await, 0);
    }

    #[tokio::test]
    async fn expired_discount_still_generates_at_full_price() {
        let fixture = Fixture::seeded().await;
        fixture
            .discounts
            .insert(
                "EXPIRED",
                Discount::new(Money::from_dollars(10), Utc::now() - Duration::days(1)),
            )
            .await;
        let mut handler = fixture.handler();

        let command = CreateOrderCommand::new(
            DOCUMENT,
            ZIP,
            Some("EXPIRED".to_string()),
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 5)],
        );

        let result = handler.handle(command).await.unwrap();

        assert!(result.success);
        assert_eq!(result.order().unwrap().total(), Money::from_dollars(60));
    }
}

mod fatal_errors {
    use super::*;

    /// Customer lookup that always fails, standing in for an unreachable
    /// backing store.
    #[derive(Clone)]
    struct DownCustomerRepository;

    #[async_trait]
    impl CustomerRepository for DownCustomerRepository {
        async fn get(&self, _document: &str) -> Result<Option<Customer>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn repository_failures_propagate_unchanged() {
        let fixture = Fixture::seeded().await;
        let mut handler = OrderHandler::new(
            DownCustomerRepository,
            fixture.delivery_fees.clone(),
            fixture.discounts.clone(),
            fixture.products.clone(),
            fixture.orders.clone(),
        );

        let command = CreateOrderCommand::new(
            DOCUMENT,
            ZIP,
            None,
            vec![CreateOrderItemCommand::new(fixture.keyboard.id, 1)],
        );

        let error = handler.handle(command).await.unwrap_err();
        assert!(matches!(error, RepositoryError::Unavailable(_)));
        assert_eq!(fixture.orders.count().await, 0);
    }

    #[tokio::test]
    async fn invalid_command_never_reaches_a_repository() {
        // The failing repository would error if touched; fail-fast means
        // it never is.
        let fixture = Fixture::seeded().await;
        let mut handler = OrderHandler::new(
            DownCustomerRepository,
            fixture.delivery_fees.clone(),
            fixture.discounts.clone(),
            fixture.products.clone(),
            fixture.orders.clone(),
        );

        let command = CreateOrderCommand::new("short", ZIP, None, vec![]);

        let result = handler.handle(command).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "invalid order");
    }
}
