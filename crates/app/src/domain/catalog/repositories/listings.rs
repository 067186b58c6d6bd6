//! Listings repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    catalog::{
        data::NewListing,
        records::{ListingRecord, ListingUuid, ProductUuid, SellerUuid},
    },
    columns::{count_to_i32, try_get_count},
};

const GET_LISTING_SQL: &str = include_str!("../sql/get_listing.sql");
const LOCK_LISTING_SQL: &str = include_str!("../sql/lock_listing.sql");
const CREATE_LISTING_SQL: &str = include_str!("../sql/create_listing.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("../sql/decrement_stock.sql");
const DELETE_LISTING_SQL: &str = include_str!("../sql/delete_listing.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgListingsRepository;

impl PgListingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<Option<ListingRecord>, sqlx::Error> {
        query_as::<Postgres, ListingRecord>(GET_LISTING_SQL)
            .bind(listing.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Read a listing and hold its row lock until the transaction ends.
    pub(crate) async fn lock_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<Option<ListingRecord>, sqlx::Error> {
        query_as::<Postgres, ListingRecord>(LOCK_LISTING_SQL)
            .bind(listing.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &NewListing,
    ) -> Result<ListingRecord, sqlx::Error> {
        query_as::<Postgres, ListingRecord>(CREATE_LISTING_SQL)
            .bind(listing.uuid.into_uuid())
            .bind(listing.seller_uuid.into_uuid())
            .bind(listing.product_uuid.into_uuid())
            .bind(listing.price)
            .bind(listing.discount_price)
            .bind(count_to_i32(listing.stock, "stock")?)
            .bind(&listing.size)
            .fetch_one(&mut **tx)
            .await
    }

    /// Subtract `quantity` from the listing's stock, returning what remains.
    ///
    /// Going below zero trips the `stock >= 0` check constraint.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
        quantity: u32,
    ) -> Result<u32, sqlx::Error> {
        let remaining: i32 = query_scalar(DECREMENT_STOCK_SQL)
            .bind(listing.into_uuid())
            .bind(count_to_i32(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await?;

        u32::try_from(remaining).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn delete_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: ListingUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LISTING_SQL)
            .bind(listing.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ListingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let seller_uuid: Option<Uuid> = row.try_get("seller_uuid")?;
        let product_uuid: Option<Uuid> = row.try_get("product_uuid")?;

        Ok(Self {
            uuid: ListingUuid::from_uuid(row.try_get("uuid")?),
            seller_uuid: seller_uuid.map(SellerUuid::from_uuid),
            product_uuid: product_uuid.map(ProductUuid::from_uuid),
            product_name: row.try_get("product_name")?,
            price: row.try_get("price")?,
            discount_price: row.try_get("discount_price")?,
            stock: try_get_count(row, "stock")?,
            size: row.try_get("size")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
