//! Order Details Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::records::{ListingUuid, ProductUuid},
    columns::{count_to_i32, try_get_count},
    customers::records::CustomerUuid,
    orders::records::{OrderDetailRecord, OrderDetailUuid, OrderUuid},
};

const CREATE_ORDER_DETAIL_SQL: &str = include_str!("../sql/create_order_detail.sql");
const GET_ORDER_DETAILS_SQL: &str = include_str!("../sql/get_order_details.sql");

/// Snapshot of a purchased line about to be written.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderDetail {
    pub(crate) order: OrderUuid,
    pub(crate) listing: ListingUuid,
    pub(crate) product: ProductUuid,
    pub(crate) customer: CustomerUuid,
    pub(crate) quantity: u32,
    pub(crate) unit_price: Decimal,
    pub(crate) total_price: Decimal,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderDetailsRepository;

impl PgOrderDetailsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_detail(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        detail: &NewOrderDetail,
    ) -> Result<OrderDetailRecord, sqlx::Error> {
        query_as::<Postgres, OrderDetailRecord>(CREATE_ORDER_DETAIL_SQL)
            .bind(OrderDetailUuid::new().into_uuid())
            .bind(detail.order.into_uuid())
            .bind(detail.listing.into_uuid())
            .bind(detail.product.into_uuid())
            .bind(detail.customer.into_uuid())
            .bind(count_to_i32(detail.quantity, "quantity")?)
            .bind(detail.unit_price)
            .bind(detail.total_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderDetailRecord>, sqlx::Error> {
        query_as::<Postgres, OrderDetailRecord>(GET_ORDER_DETAILS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderDetailRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderDetailUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            listing_uuid: ListingUuid::from_uuid(row.try_get("listing_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            unit_price: row.try_get("unit_price")?,
            total_price: row.try_get("total_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
