//! OpenAPI / Swagger UI documentation.
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::handlers::order::UpdateStatusRequest;
use super::types::{DeletedBody, ErrorBody, HealthBody};
use crate::order::{NewOrder, OrderFields, OrderStatus};
use crate::product::{NewProduct, ProductFields, ProductPatch};

/// Caller identity header. Stand-in for a real session layer.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-User-Id",
                    "Caller identity. Required on every mutating endpoint.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tradepost Marketplace API",
        version = "1.0.0",
        description = "A small online marketplace: sellers list products, buyers place orders, sellers move orders through their lifecycle.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        super::handlers::health::health_check,
        super::handlers::product::list_products,
        super::handlers::product::get_product,
        super::handlers::product::create_product,
        super::handlers::product::update_product,
        super::handlers::product::delete_product,
        super::handlers::order::list_orders,
        super::handlers::order::get_order,
        super::handlers::order::create_order,
        super::handlers::order::update_order_status,
    ),
    components(
        schemas(
            ProductFields,
            NewProduct,
            ProductPatch,
            OrderFields,
            OrderStatus,
            NewOrder,
            UpdateStatusRequest,
            ErrorBody,
            DeletedBody,
            HealthBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Products", description = "Product catalog"),
        (name = "Orders", description = "Order lifecycle"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
