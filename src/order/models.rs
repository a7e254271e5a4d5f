//! Order record types, status state machine, and input DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::ServiceError;
use crate::store::Record;

/// Closed order status enumeration.
///
/// Legal transitions: `Pending -> Shipped`, `Pending -> Cancelled`,
/// `Shipped -> Delivered`. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Shipped)
                | (Self::Pending, Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(ServiceError::invalid_input(format!(
                "unrecognized status: {other}"
            ))),
        }
    }
}

/// Stored fields of an order.
///
/// `productName` and `totalPrice` are snapshots of the referenced product at
/// order-creation time and are never recomputed, so later product mutation
/// or deletion leaves existing orders intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderFields {
    pub product_id: String,
    pub product_name: String,
    pub buyer_id: String,
    /// Copied from the referenced product at creation, never caller-supplied.
    pub seller_id: String,
    pub quantity: u32,
    /// Snapshot of `product.price * quantity`.
    pub total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub type Order = Record<OrderFields>;

/// Create request. Any caller-supplied `status` is accepted and discarded:
/// orders always start `Pending`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_id: Option<String>,
    pub buyer_id: Option<String>,
    /// Accepts a JSON integer or a numeric string; coerced to a positive count.
    pub quantity: Option<serde_json::Value>,
    pub shipping_address: Option<String>,
    pub status: Option<String>,
}

/// Coerce a caller-supplied quantity into a positive integer.
pub fn coerce_quantity(value: &serde_json::Value) -> Result<u32, ServiceError> {
    let quantity = match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
    .filter(|&q| q > 0)
    .ok_or_else(|| ServiceError::invalid_input("quantity must be a positive integer"))?;
    Ok(quantity)
}
