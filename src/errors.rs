use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::OrderError;

/// HTTP-surface error. Every internal failure is converted into exactly one
/// of these before it reaches a handler result; raw diesel/r2d2/reqwest
/// errors never cross this boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Order not found")]
    NotFound,

    #[error("{0}")]
    DependencyUnavailable(String),

    #[error("{0}")]
    DependencyContractViolation(String),

    #[error("{0}")]
    Persistence(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound => "NotFound",
            AppError::DependencyUnavailable(_) => "DependencyUnavailable",
            AppError::DependencyContractViolation(_) => "DependencyContractViolation",
            AppError::Persistence(_) => "PersistenceError",
        }
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::NotFound => AppError::NotFound,
            OrderError::DependencyUnavailable(_) => AppError::DependencyUnavailable(message),
            OrderError::DependencyContractViolation(_) => {
                AppError::DependencyContractViolation(message)
            }
            OrderError::PersistenceError(_) => AppError::Persistence(message),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DependencyUnavailable(_) | AppError::DependencyContractViolation(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}
