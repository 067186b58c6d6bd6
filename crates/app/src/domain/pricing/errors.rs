//! Pricing errors.

use thiserror::Error;

use crate::{domain::catalog::records::ListingUuid, errors::ErrorKind};

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("cannot price an empty set of lines")]
    EmptyCart,

    #[error("listing {0} not found")]
    ListingNotFound(ListingUuid),

    #[error("price arithmetic overflowed")]
    Overflow,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

impl PricingError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCart => ErrorKind::Invalid,
            Self::ListingNotFound(_) => ErrorKind::NotFound,
            Self::Overflow | Self::Sql(_) => ErrorKind::Internal,
        }
    }
}
