//! Shared identifier types for the storefront checkout system.

mod types;

pub use types::{OrderNumber, ProductId};
