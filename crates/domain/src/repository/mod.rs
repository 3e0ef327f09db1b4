//! Collaborator contracts consumed by the checkout core.
//!
//! Lookups are read-only; [`OrderRepository::save`] is the only write.
//! Expected "not found" outcomes are `Ok(None)` (or a zero fee), never
//! errors. [`RepositoryError`] is reserved for fatal backing-store
//! failures, which the handler propagates unchanged.

mod memory;

use async_trait::async_trait;
use common::ProductId;
use thiserror::Error;

use crate::entities::{Customer, Discount, Product};
use crate::money::Money;
use crate::order::Order;

pub use memory::{
    InMemoryCustomerRepository, InMemoryDeliveryFeeRepository, InMemoryDiscountRepository,
    InMemoryOrderRepository, InMemoryProductRepository,
};

/// Fatal failure at the collaborator boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded.
    #[error("malformed record for key {key}: {detail}")]
    Malformed { key: String, detail: String },
}

/// Result alias for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Looks up customers by document identifier.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn get(&self, document: &str) -> Result<Option<Customer>>;
}

/// Resolves the flat delivery fee for a zip code.
///
/// An unresolvable zip code yields a zero fee, not an error.
#[async_trait]
pub trait DeliveryFeeRepository: Send + Sync {
    async fn get(&self, zip_code: &str) -> Result<Money>;
}

/// Looks up promotional discounts by promo code.
#[async_trait]
pub trait DiscountRepository: Send + Sync {
    async fn get(&self, promo_code: &str) -> Result<Option<Discount>>;
}

/// Batch-resolves catalog products by identifier.
///
/// Unknown identifiers are simply absent from the result.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, ids: &[ProductId]) -> Result<Vec<Product>>;
}

/// Persists generated orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save(&self, order: &Order) -> Result<()>;
}
