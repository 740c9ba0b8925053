//! Health endpoint for orchestration and load balancers.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health probe payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthBody {
    /// Fixed `"OK"` while the process is serving traffic.
    #[schema(example = "OK")]
    pub status: String,
}

/// Application health probe. Returns 200 with a fixed payload while the
/// process is up; failing to answer at all is the unhealthy signal.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["app"],
    responses(
        (status = 200, description = "Application is healthy", body = HealthBody)
    )
)]
#[get("/health")]
pub async fn health() -> web::Json<HealthBody> {
    web::Json(HealthBody {
        status: "OK".to_owned(),
    })
}
