use actix_web::HttpResponse;
use serde_json::json;

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message")),
    tag = "service"
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Welcome to the Order Service!" }))
}

/// GET /health
///
/// Liveness only: answers 200 regardless of database or product-service
/// reachability.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service liveness")),
    tag = "service"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok", "service": "order-service" }))
}
