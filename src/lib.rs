//! tradepost - a small online marketplace backend
//!
//! Sellers list products, buyers place orders, sellers move orders through
//! their lifecycle. A thin REST layer (axum) over a pluggable tabular record
//! store.
//!
//! # Modules
//!
//! - [`store`] - Record store boundary (remote tabular service + in-process backend)
//! - [`product`] - Product catalog service
//! - [`order`] - Order lifecycle service
//! - [`gateway`] - HTTP API layer
//! - [`client`] - Typed client SDK
//! - [`error`] - Service error taxonomy
//! - [`config`] / [`logging`] - Process wiring

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod order;
pub mod product;
pub mod store;

// Convenient re-exports at crate root
pub use client::TradepostClient;
pub use error::ServiceError;
pub use order::{Order, OrderService, OrderStatus};
pub use product::{Product, ProductService};
pub use store::{RecordStore, StoreError};
