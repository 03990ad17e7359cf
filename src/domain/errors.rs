use thiserror::Error;

/// Classification of a single product-catalog lookup failure. The
/// orchestrator maps each variant to a distinct request outcome, so they
/// must never be collapsed into one generic error.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The catalog explicitly reported that the product does not exist.
    #[error("product '{0}' not found")]
    NotFound(String),
    /// Connection refused, DNS failure, or the bounded timeout elapsed.
    #[error("product service unreachable: {0}")]
    Unreachable(String),
    /// The catalog responded, but the payload is not the expected shape.
    #[error("malformed product payload: {0}")]
    MalformedResponse(String),
    /// The catalog responded with a non-2xx status other than 404.
    #[error("product service returned status {0}")]
    RemoteError(u16),
}

/// A business rejection: the request was understood and decided against by
/// domain rules. Distinct from `OrderError`, which covers infrastructure
/// failures where no decision could be made.
#[derive(Debug, Error)]
pub enum RejectionReason {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("product '{0}' not found")]
    ProductNotFound(String),
    #[error(
        "insufficient stock for product '{product_id}': requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: String,
        requested: i32,
        available: i64,
    },
}

impl RejectionReason {
    pub fn kind(&self) -> &'static str {
        match self {
            RejectionReason::InvalidInput(_) => "InvalidInput",
            RejectionReason::ProductNotFound(_) => "ProductNotFound",
            RejectionReason::InsufficientStock { .. } => "InsufficientStock",
        }
    }
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,
    /// Transient dependency failure; the caller may retry unchanged.
    #[error("product service unavailable: {0}")]
    DependencyUnavailable(String),
    /// The product service broke its response contract; retrying will not
    /// help until the integration is fixed.
    #[error("product service contract violation: {0}")]
    DependencyContractViolation(String),
    #[error("persistence failure: {0}")]
    PersistenceError(String),
}

impl OrderError {
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::NotFound => "NotFound",
            OrderError::DependencyUnavailable(_) => "DependencyUnavailable",
            OrderError::DependencyContractViolation(_) => "DependencyContractViolation",
            OrderError::PersistenceError(_) => "PersistenceError",
        }
    }
}
