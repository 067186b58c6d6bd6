//! Checkout service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{domain::inventory::InventoryError, errors::ErrorKind};

/// Preconditions that abort a whole confirmation.
#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("customer has no active cart")]
    NoActiveCart,

    #[error("cart has no lines")]
    EmptyCart,

    #[error("customer not found")]
    CustomerNotFound,

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("storage error")]
    Sql(#[from] Error),
}

impl CheckoutServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoActiveCart | Self::CustomerNotFound => ErrorKind::NotFound,
            Self::EmptyCart => ErrorKind::Invalid,
            Self::Inventory(error) => error.kind(),
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}
