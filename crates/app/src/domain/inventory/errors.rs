//! Inventory errors.

use thiserror::Error;

use crate::{domain::catalog::records::ListingUuid, errors::ErrorKind};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("listing {0} not found")]
    ListingNotFound(ListingUuid),

    #[error("seller of listing {0} no longer exists")]
    SellerMissing(ListingUuid),

    #[error("product of listing {0} no longer exists")]
    ProductMissing(ListingUuid),

    #[error("insufficient stock for listing {listing}: requested {requested}, available {available}")]
    InsufficientStock {
        listing: ListingUuid,
        requested: u32,
        available: u32,
    },

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

impl InventoryError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ListingNotFound(_) | Self::SellerMissing(_) | Self::ProductMissing(_) => {
                ErrorKind::NotFound
            }
            Self::InsufficientStock { .. } => ErrorKind::Invalid,
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}
