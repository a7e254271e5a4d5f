use axum::Json;

use super::super::types::HealthBody;

/// Health check
///
/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthBody)),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: format!("{}+{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
    })
}
