use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::errors::RejectionReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// In-transaction initial state. Never visible in committed data.
    Pending,
    Confirmed,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "rejected" => Ok(OrderStatus::Rejected),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

/// Point-in-time view of a product as reported by the catalog service.
/// Fetched fresh on every order-creation attempt, never cached or persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSnapshot {
    pub id: String,
    pub stock: i64,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub product_id: String,
    pub quantity: i32,
}

impl CreateOrderCommand {
    /// Structural validation only; availability is checked against the
    /// remote snapshot afterwards.
    pub fn validate(&self) -> Result<(), RejectionReason> {
        if self.product_id.trim().is_empty() {
            return Err(RejectionReason::InvalidInput(
                "productId must not be empty".to_string(),
            ));
        }
        if self.quantity <= 0 {
            return Err(RejectionReason::InvalidInput(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewOrderRecord {
    pub product_id: String,
    pub quantity: i32,
    pub status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub product_id: String,
    pub quantity: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Terminal business outcome of an order-creation request. Infrastructure
/// failures (dependency down, persistence error) are not outcomes and travel
/// as `OrderError` instead.
#[derive(Debug)]
pub enum CreateOrderOutcome {
    Confirmed(OrderView),
    Rejected {
        /// Audit row for the rejection, when one was written.
        record: Option<OrderView>,
        reason: RejectionReason,
    },
}
