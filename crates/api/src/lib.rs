//! HTTP API server with observability for the storefront checkout system.
//!
//! Exposes the create-order use case over REST, with structured logging
//! (tracing) and Prometheus metrics. The core envelope contract stays in
//! the domain crate; this layer only maps it onto HTTP.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use chrono::{Duration, Utc};
use common::ProductId;
use domain::{
    Customer, Discount, InMemoryCustomerRepository, InMemoryDeliveryFeeRepository,
    InMemoryDiscountRepository, InMemoryOrderRepository, InMemoryProductRepository, Money, Product,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create))
        .route("/orders/{number}", get(routes::orders::get))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// The identifiers the demo state was seeded with, so callers can drive
/// the API without digging through the repositories.
#[derive(Debug, Clone)]
pub struct DemoSeed {
    pub customer_document: String,
    pub zip_code: String,
    pub promo_code: String,
    pub product_ids: Vec<ProductId>,
}

/// Creates application state over in-memory repositories seeded with a
/// small demo catalog.
pub async fn create_default_state() -> (Arc<AppState>, DemoSeed) {
    let customers = InMemoryCustomerRepository::new();
    let delivery_fees = InMemoryDeliveryFeeRepository::new();
    let discounts = InMemoryDiscountRepository::new();
    let products = InMemoryProductRepository::new();
    let orders = InMemoryOrderRepository::new();

    let seed = DemoSeed {
        customer_document: "123456789012".to_string(),
        zip_code: "0456405".to_string(),
        promo_code: "PROMO10".to_string(),
        product_ids: Vec::new(),
    };

    customers
        .insert(
            seed.customer_document.clone(),
            Customer::new("Alice Santos", "alice@example.com"),
        )
        .await;
    delivery_fees
        .insert(seed.zip_code.clone(), Money::from_dollars(10))
        .await;
    discounts
        .insert(
            seed.promo_code.clone(),
            Discount::new(Money::from_dollars(10), Utc::now() + Duration::days(30)),
        )
        .await;

    let catalog = [
        Product::new("Mechanical keyboard", Money::from_cents(12990), true),
        Product::new("Wireless mouse", Money::from_cents(4990), true),
        Product::new("USB-C dock", Money::from_cents(18990), true),
    ];

    let mut seed = seed;
    for product in catalog {
        seed.product_ids.push(product.id);
        products.insert(product).await;
    }

    let state = Arc::new(AppState {
        customers,
        delivery_fees,
        discounts,
        products,
        orders,
    });

    (state, seed)
}
