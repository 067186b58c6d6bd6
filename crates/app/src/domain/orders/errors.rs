//! Order errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    domain::{
        catalog::records::{ListingUuid, SellerUuid},
        inventory::InventoryError,
        orders::records::OrderStatus,
        pricing::PricingError,
    },
    errors::ErrorKind,
};

/// Failures creating one seller's order.
#[derive(Debug, Error)]
pub enum OrderFactoryError {
    #[error("seller sub-cart has no lines")]
    EmptyCart,

    #[error("listing {listing} is not sold by seller {seller}")]
    SellerMismatch {
        listing: ListingUuid,
        seller: SellerUuid,
    },

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[from] Error),
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    OrderNotFound,

    #[error("cannot move order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("page must be at least 1 and limit between 1 and 100")]
    InvalidPage,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OrderNotFound => ErrorKind::NotFound,
            Self::InvalidStatusTransition { .. } | Self::InvalidPage => ErrorKind::Invalid,
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::OrderNotFound,
            error => Self::Sql(error),
        }
    }
}
