//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as DbErrorKind},
};
use thiserror::Error;

use crate::{
    domain::{inventory::InventoryError, pricing::PricingError},
    errors::ErrorKind,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("customer not found")]
    CustomerNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("customer has no active cart")]
    NoActiveCart,

    #[error("cart line not found")]
    LineNotFound,

    #[error("cart update must contain at least one line")]
    EmptyUpdate,

    #[error("cart has no lines")]
    EmptyCart,

    #[error("cart belongs to another customer or is no longer active")]
    Forbidden,

    #[error("customer already has an active cart")]
    ActiveCartExists,

    #[error("line quantity must be a positive integer")]
    InvalidQuantity,

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CartsServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CustomerNotFound | Self::CartNotFound | Self::NoActiveCart | Self::LineNotFound => {
                ErrorKind::NotFound
            }
            Self::EmptyUpdate | Self::EmptyCart | Self::InvalidQuantity => ErrorKind::Invalid,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::ActiveCartExists => ErrorKind::Conflict,
            Self::Inventory(error) => error.kind(),
            Self::Pricing(error) => error.kind(),
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(DbErrorKind::UniqueViolation) => Self::ActiveCartExists,
            Some(DbErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(_) | None => Self::Sql(error),
        }
    }
}
