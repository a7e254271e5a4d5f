use std::sync::Arc;

use crate::order::OrderService;
use crate::product::ProductService;

/// Shared gateway state: the two services, each holding the injected store
/// client. No other in-process state is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub orders: Arc<OrderService>,
}

impl AppState {
    pub fn new(products: Arc<ProductService>, orders: Arc<OrderService>) -> Self {
        Self { products, orders }
    }
}
