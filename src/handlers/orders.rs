use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{CreateOrderCommand, CreateOrderOutcome, OrderView};
use crate::errors::AppError;
use crate::AppService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub product_id: String,
    pub quantity: i32,
    pub status: String,
    pub created_at: String,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        Self {
            id: order.id,
            product_id: order.product_id,
            quantity: order.quantity,
            status: order.status.to_string(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates the ordered product against the catalog service before
/// committing the order locally. Business rejections come back as 400 with
/// the rejection kind and the audit row id; dependency failures as 502.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created and confirmed", body = OrderResponse),
        (status = 400, description = "Invalid input or business rejection"),
        (status = 502, description = "Product service unavailable or broke its contract"),
        (status = 500, description = "Local persistence failure"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let outcome = service
        .create_order(CreateOrderCommand {
            product_id: body.product_id,
            quantity: body.quantity,
        })
        .await?;

    Ok(match outcome {
        CreateOrderOutcome::Confirmed(order) => {
            HttpResponse::Created().json(OrderResponse::from(order))
        }
        CreateOrderOutcome::Rejected { record, reason } => {
            HttpResponse::BadRequest().json(json!({
                "error": reason.kind(),
                "message": reason.to_string(),
                "orderId": record.map(|r| r.id),
            }))
        }
    })
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order = service.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
