//! Create-order and order lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderNumber;
use domain::{
    CommandResult, CreateOrderCommand, InMemoryCustomerRepository, InMemoryDeliveryFeeRepository,
    InMemoryDiscountRepository, InMemoryOrderRepository, InMemoryProductRepository, Order,
    OrderHandler,
};
use serde::Serialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
///
/// Holds the repository collaborators; each request builds its own
/// handler over clones of them, so no handler state is shared between
/// requests.
pub struct AppState {
    pub customers: InMemoryCustomerRepository,
    pub delivery_fees: InMemoryDeliveryFeeRepository,
    pub discounts: InMemoryDiscountRepository,
    pub products: InMemoryProductRepository,
    pub orders: InMemoryOrderRepository,
}

impl AppState {
    /// Builds a fresh handler over the shared repositories.
    pub fn handler(
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

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub number: String,
    pub status: String,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub total_cents: i64,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        let items = order
            .items()
            .iter()
            .map(|item| OrderItemResponse {
                product_name: item.product().map(|p| p.name.clone()),
                quantity: item.quantity(),
                unit_price_cents: item.unit_price().cents(),
                total_cents: item.total().cents(),
            })
            .collect();

        Self {
            number: order.number().to_string(),
            status: order.status().to_string(),
            customer_email: order.customer().map(|c| c.email.clone()),
            items,
            subtotal_cents: order.subtotal().cents(),
            delivery_fee_cents: order.delivery_fee().cents(),
            total_cents: order.total().cents(),
        }
    }
}

// -- Handlers --

/// POST /orders — runs the create-order use case.
///
/// The request body is the create-order command itself. Success maps to
/// 201 with the generated order as payload; an aggregated validation
/// failure maps to 400 with the notification list.
#[tracing::instrument(skip(state, command))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(command): Json<CreateOrderCommand>,
) -> Result<(StatusCode, Json<CommandResult>), ApiError> {
    let mut handler = state.handler();
    let result = handler.handle(command).await?;

    let status = if result.success {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(result)))
}

/// GET /orders/:number — looks up a saved order by number.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let number = OrderNumber::from(number.as_str());
    let order = state
        .orders
        .find(&number)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("order {number} not found")))?;

    Ok(Json(OrderResponse::from(&order)))
}
