//! Service error taxonomy
//!
//! Everything the product and order services can fail with. The gateway maps
//! these onto HTTP status codes (`InvalidInput` → 400, `Forbidden` → 403,
//! `NotFound` → 404, `Conflict`/`InvalidTransition` → 409, `Store` → 500).

use thiserror::Error;

use crate::order::OrderStatus;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("caller is not allowed to modify this {0}")]
    Forbidden(&'static str),

    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("product changed while the order was being placed")]
    Conflict,

    #[error(transparent)]
    Store(StoreError),
}

impl ServiceError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Map a store failure, turning the store's not-found signal into a
    /// `NotFound` for the named entity.
    pub fn for_entity(entity: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |err| match err {
            StoreError::NotFound => Self::NotFound(entity),
            other => Self::Store(other),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Store(StoreError::from(err))
    }
}
