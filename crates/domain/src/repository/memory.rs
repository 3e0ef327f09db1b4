//! In-memory repository implementations.
//!
//! These back the integration tests and the demo API state. Each holds
//! its records behind `Arc<RwLock<..>>` so clones share one store, the
//! same shape as any other process-local fake in this workspace.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderNumber, ProductId};
use tokio::sync::RwLock;

use crate::entities::{Customer, Discount, Product};
use crate::money::Money;
use crate::order::Order;

use super::{
    CustomerRepository, DeliveryFeeRepository, DiscountRepository, OrderRepository,
    ProductRepository, Result,
};

/// Customers keyed by document identifier.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<String, Customer>>>,
}

impl InMemoryCustomerRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customer under a document identifier.
    pub async fn insert(&self, document: impl Into<String>, customer: Customer) {
        self.customers
            .write()
            .await
            .insert(document.into(), customer);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get(&self, document: &str) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(document).cloned())
    }
}

/// Flat delivery fees keyed by zip code. Unknown zip codes resolve to a
/// zero fee.
#[derive(Clone, Default)]
pub struct InMemoryDeliveryFeeRepository {
    fees: Arc<RwLock<HashMap<String, Money>>>,
}

impl InMemoryDeliveryFeeRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the fee charged for a zip code.
    pub async fn insert(&self, zip_code: impl Into<String>, fee: Money) {
        self.fees.write().await.insert(zip_code.into(), fee);
    }
}

#[async_trait]
impl DeliveryFeeRepository for InMemoryDeliveryFeeRepository {
    async fn get(&self, zip_code: &str) -> Result<Money> {
        Ok(self
            .fees
            .read()
            .await
            .get(zip_code)
            .copied()
            .unwrap_or_default())
    }
}

/// Discounts keyed by promo code.
#[derive(Clone, Default)]
pub struct InMemoryDiscountRepository {
    discounts: Arc<RwLock<HashMap<String, Discount>>>,
}

impl InMemoryDiscountRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a discount under a promo code.
    pub async fn insert(&self, promo_code: impl Into<String>, discount: Discount) {
        self.discounts
            .write()
            .await
            .insert(promo_code.into(), discount);
    }
}

#[async_trait]
impl DiscountRepository for InMemoryDiscountRepository {
    async fn get(&self, promo_code: &str) -> Result<Option<Discount>> {
        Ok(self.discounts.read().await.get(promo_code).cloned())
    }
}

/// Catalog products keyed by identifier.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a catalog product.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }
}

/// Saved orders keyed by order number.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderNumber, Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a saved order by number.
    pub async fn find(&self, number: &OrderNumber) -> Option<Order> {
        self.orders.read().await.get(number).cloned()
    }

    /// Returns the number of saved orders.
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<()> {
        self.orders
            .write()
            .await
            .insert(order.number().clone(), order.clone());
        Ok(())
    }
}
