use async_trait::async_trait;
use uuid::Uuid;

use super::errors::{LookupError, OrderError};
use super::order::{NewOrderRecord, OrderView, ProductSnapshot};

/// Read-only client for the product catalog service.
#[async_trait]
pub trait ProductLookup: Send + Sync + 'static {
    /// Fetch a fresh snapshot of one product. Exactly one outbound call per
    /// invocation; no client-side retries.
    async fn fetch_product(&self, product_id: &str) -> Result<ProductSnapshot, LookupError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Persist an order inside a single transaction and return the stored
    /// view. All-or-nothing: a failed create leaves no visible row.
    async fn create(&self, record: NewOrderRecord) -> Result<OrderView, OrderError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, OrderError>;
}
