//! HTTP API layer
//!
//! Thin translation between the REST surface and the two services: extract
//! the caller identity, hand the request to a service, map the result onto a
//! status code. No caching and no shared mutable state between requests.

pub mod handlers;
pub mod identity;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use crate::order::OrderService;
use crate::product::ProductService;
use state::AppState;

/// Build the full application router. Exposed separately from
/// [`run_server`] so tests can drive it in-process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route(
            "/api/products",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/api/products/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
        .route(
            "/api/orders",
            get(handlers::order::list_orders).post(handlers::order::create_order),
        )
        .route("/api/orders/{id}", get(handlers::order::get_order))
        .route(
            "/api/orders/{id}/status",
            put(handlers::order::update_order_status),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start the HTTP gateway.
pub async fn run_server(
    config: &GatewayConfig,
    products: Arc<ProductService>,
    orders: Arc<OrderService>,
) -> anyhow::Result<()> {
    let app = router(AppState::new(products, orders));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind to {addr}: {e}"))?;

    tracing::info!("gateway listening on http://{addr}");
    tracing::info!("api docs at http://{addr}/docs");

    axum::serve(listener, app).await?;
    Ok(())
}
