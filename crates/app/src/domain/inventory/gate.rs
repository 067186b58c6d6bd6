//! Inventory Gate

use sqlx::{
    Postgres, Transaction,
    error::{DatabaseError, ErrorKind as DbErrorKind},
};
use tracing::debug;

use crate::domain::{
    catalog::{
        records::{ListingRecord, ListingUuid, ProductUuid, SellerUuid},
        repositories::PgListingsRepository,
    },
    inventory::errors::InventoryError,
};

/// A listing whose seller and product relations are intact and whose stock covered the
/// requested quantity when it was locked.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedListing {
    pub seller: SellerUuid,
    pub product: ProductUuid,
    pub record: ListingRecord,
}

impl CheckedListing {
    #[must_use]
    pub fn uuid(&self) -> ListingUuid {
        self.record.uuid
    }
}

/// Validates and decrements listing stock inside the caller's transaction.
///
/// Listings are read with a row lock, so concurrent transactions touching the same listing
/// serialize on it until the holder commits or rolls back.
#[derive(Debug, Clone, Default)]
pub struct InventoryGate {
    listings: PgListingsRepository,
}

impl InventoryGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: PgListingsRepository::new(),
        }
    }

    /// Lock the listing and check that its stock covers `requested`.
    pub async fn check_and_reserve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
        requested: u32,
    ) -> Result<CheckedListing, InventoryError> {
        let record = self
            .listings
            .lock_listing(tx, listing)
            .await?
            .ok_or(InventoryError::ListingNotFound(listing))?;

        let seller = record
            .seller_uuid
            .ok_or(InventoryError::SellerMissing(listing))?;

        let product = record
            .product_uuid
            .ok_or(InventoryError::ProductMissing(listing))?;

        if record.stock < requested {
            return Err(InventoryError::InsufficientStock {
                listing,
                requested,
                available: record.stock,
            });
        }

        Ok(CheckedListing {
            seller,
            product,
            record,
        })
    }

    /// Lock and check several listings, returning the results in the order requested.
    ///
    /// Rows are locked in ascending listing uuid order whatever order `lines` is in, so two
    /// transactions touching the same listings always queue instead of deadlocking.
    pub async fn check_and_reserve_all(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[(ListingUuid, u32)],
    ) -> Result<Vec<CheckedListing>, InventoryError> {
        let mut ordered: Vec<(usize, ListingUuid, u32)> = lines
            .iter()
            .enumerate()
            .map(|(position, (listing, quantity))| (position, *listing, *quantity))
            .collect();

        ordered.sort_by_key(|(_, listing, _)| *listing);

        let mut checked = Vec::with_capacity(ordered.len());

        for (position, listing, quantity) in ordered {
            checked.push((position, self.check_and_reserve(tx, listing, quantity).await?));
        }

        checked.sort_by_key(|(position, _)| *position);

        Ok(checked.into_iter().map(|(_, listing)| listing).collect())
    }

    /// Subtract `quantity` from the listing's stock.
    ///
    /// The caller is expected to have run [`Self::check_and_reserve`] in the same
    /// transaction. Stock never goes negative: the column check rejects it.
    pub async fn decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
        quantity: u32,
    ) -> Result<u32, InventoryError> {
        let remaining = self
            .listings
            .decrement_stock(tx, listing, quantity)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => InventoryError::ListingNotFound(listing),
                error
                    if matches!(
                        error.as_database_error().map(DatabaseError::kind),
                        Some(DbErrorKind::CheckViolation)
                    ) =>
                {
                    InventoryError::InsufficientStock {
                        listing,
                        requested: quantity,
                        available: 0,
                    }
                }
                error => InventoryError::Sql(error),
            })?;

        debug!(%listing, quantity, remaining, "decremented listing stock");

        Ok(remaining)
    }
}
