//! Domain layer for the storefront checkout system.
//!
//! This crate provides the core checkout building blocks including:
//! - Notification ledger and fluent validation contract
//! - Customer, Product, and Discount entities
//! - Order aggregate with pricing and a status state machine
//! - CreateOrderCommand DTO with self-validation
//! - OrderHandler orchestrating the create-order use case
//! - Repository traits with in-memory implementations

pub mod command;
pub mod contract;
pub mod entities;
pub mod handler;
pub mod money;
pub mod notification;
pub mod order;
pub mod repository;

pub use command::{CommandData, CommandResult, CreateOrderCommand, CreateOrderItemCommand};
pub use contract::Contract;
pub use entities::{Customer, Discount, Product};
pub use handler::OrderHandler;
pub use money::Money;
pub use notification::{Ledger, Notification};
pub use order::{Order, OrderItem, OrderStatus};
pub use repository::{
    CustomerRepository, DeliveryFeeRepository, DiscountRepository, InMemoryCustomerRepository,
    InMemoryDeliveryFeeRepository, InMemoryDiscountRepository, InMemoryOrderRepository,
    InMemoryProductRepository, OrderRepository, ProductRepository, RepositoryError,
};
