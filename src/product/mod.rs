//! Product catalog: models and CRUD service.

pub mod models;
pub mod service;

pub use models::{NewProduct, Product, ProductFields, ProductPatch};
pub use service::ProductService;
