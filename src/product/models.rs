//! Product record types and input DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::ServiceError;
use crate::store::Record;

/// Stored fields of a product. `sellerId` is set once at creation and never
/// changed by update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Non-negative price, serialized as a JSON number.
    pub price: Decimal,
    /// Absent means "use caller-side default placeholder".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub seller_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub type Product = Record<ProductFields>;

/// Create request. Presence is validated by the service, not by serde, so a
/// missing field produces a 400 with a useful message instead of a
/// deserialization error.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Accepts a JSON number or a numeric string; coerced to a decimal.
    pub price: Option<serde_json::Value>,
    pub image_url: Option<String>,
    pub seller_id: Option<String>,
}

/// Update request. Deliberately has no `sellerId` field: a caller-supplied
/// seller is ignored, keeping seller attribution immutable.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<serde_json::Value>,
    pub image_url: Option<String>,
}

/// Coerce a caller-supplied price into a non-negative decimal.
///
/// Clients send prices as JSON numbers, but form-driven callers have
/// historically sent numeric strings; both are accepted.
pub fn coerce_price(value: &serde_json::Value) -> Result<Decimal, ServiceError> {
    let price = match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
    .ok_or_else(|| ServiceError::invalid_input("price must be a number"))?;

    if price.is_sign_negative() {
        return Err(ServiceError::invalid_input("price must not be negative"));
    }
    Ok(price)
}
