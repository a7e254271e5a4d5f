//! Order lifecycle: models, status state machine, and service.

pub mod models;
pub mod service;

pub use models::{NewOrder, Order, OrderFields, OrderStatus};
pub use service::OrderService;
