use uuid::Uuid;

use crate::domain::errors::{LookupError, OrderError, RejectionReason};
use crate::domain::order::{
    CreateOrderCommand, CreateOrderOutcome, NewOrderRecord, OrderStatus, OrderView,
};
use crate::domain::ports::{OrderRepository, ProductLookup};

/// Sequences remote product validation and local persistence for order
/// creation. Stateless per request; both collaborators are injected behind
/// their port traits so tests can swap them out.
pub struct OrderService<L, R> {
    products: L,
    orders: R,
}

impl<L: ProductLookup, R: OrderRepository> OrderService<L, R> {
    pub fn new(products: L, orders: R) -> Self {
        Self { products, orders }
    }

    /// Create an order: structural validation, then one fresh catalog
    /// lookup, then an all-or-nothing local write.
    ///
    /// Business decisions (confirmation, rejection) come back as
    /// `CreateOrderOutcome`; infrastructure failures as `OrderError`. The
    /// catalog's stock figure may be stale by the time the local commit
    /// happens; no cross-request reservation is attempted.
    pub async fn create_order(
        &self,
        cmd: CreateOrderCommand,
    ) -> Result<CreateOrderOutcome, OrderError> {
        if let Err(reason) = cmd.validate() {
            // Structurally invalid requests are decided without touching
            // the catalog and leave no audit trail.
            return Ok(CreateOrderOutcome::Rejected {
                record: None,
                reason,
            });
        }

        let snapshot = match self.products.fetch_product(&cmd.product_id).await {
            Ok(snapshot) => snapshot,
            Err(LookupError::NotFound(id)) => {
                let record = self.audit_rejection(&cmd).await;
                return Ok(CreateOrderOutcome::Rejected {
                    record,
                    reason: RejectionReason::ProductNotFound(id),
                });
            }
            Err(e @ LookupError::Unreachable(_)) | Err(e @ LookupError::RemoteError(_)) => {
                return Err(OrderError::DependencyUnavailable(e.to_string()));
            }
            Err(e @ LookupError::MalformedResponse(_)) => {
                return Err(OrderError::DependencyContractViolation(e.to_string()));
            }
        };

        if snapshot.stock < i64::from(cmd.quantity) {
            let record = self.audit_rejection(&cmd).await;
            return Ok(CreateOrderOutcome::Rejected {
                record,
                reason: RejectionReason::InsufficientStock {
                    product_id: cmd.product_id,
                    requested: cmd.quantity,
                    available: snapshot.stock,
                },
            });
        }

        let order = self
            .orders
            .create(NewOrderRecord {
                product_id: cmd.product_id,
                quantity: cmd.quantity,
                status: OrderStatus::Confirmed,
            })
            .await?;

        Ok(CreateOrderOutcome::Confirmed(order))
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderView, OrderError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound)
    }

    /// Best-effort audit row for a business rejection. The rejection stands
    /// even if this write fails; the caller then gets no order id.
    async fn audit_rejection(&self, cmd: &CreateOrderCommand) -> Option<OrderView> {
        match self
            .orders
            .create(NewOrderRecord {
                product_id: cmd.product_id.clone(),
                quantity: cmd.quantity,
                status: OrderStatus::Rejected,
            })
            .await
        {
            Ok(view) => Some(view),
            Err(e) => {
                log::warn!(
                    "failed to record rejected order for product '{}': {}",
                    cmd.product_id,
                    e
                );
                None
            }
        }
    }
}
