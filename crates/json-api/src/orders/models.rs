//! Order Request & Response Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::orders::{
    data::PageRequest,
    records::{OrderDetailRecord, OrderRecord},
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub customer: Uuid,
    pub seller: Uuid,
    pub cart: Uuid,

    #[salvo(schema(value_type = f64))]
    pub ship_price: Decimal,

    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,

    /// One of `pending`, `shipped`, `delivered`
    pub status: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            customer: order.customer_uuid.into(),
            seller: order.seller_uuid.into(),
            cart: order.cart_uuid.into(),
            ship_price: order.ship_price,
            total_price: order.total_price,
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailResponse {
    pub uuid: Uuid,
    pub order: Uuid,
    pub listing: Uuid,
    pub product: Uuid,
    pub quantity: u32,

    /// Unit price at the time of purchase
    #[salvo(schema(value_type = f64))]
    pub unit_price: Decimal,

    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,

    pub created_at: String,
}

impl From<OrderDetailRecord> for OrderDetailResponse {
    fn from(detail: OrderDetailRecord) -> Self {
        Self {
            uuid: detail.uuid.into(),
            order: detail.order_uuid.into(),
            listing: detail.listing_uuid.into(),
            product: detail.product_uuid.into(),
            quantity: detail.quantity,
            unit_price: detail.unit_price,
            total_price: detail.total_price,
            created_at: detail.created_at.to_string(),
        }
    }
}

/// Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    /// Next status: `shipped` or `delivered`
    pub status: String,
}

/// Page request from optional `page` and `limit` query parameters.
pub(crate) fn page_request(page: Option<u32>, limit: Option<u32>) -> PageRequest {
    let defaults = PageRequest::default();

    PageRequest::new(
        page.unwrap_or(defaults.page),
        limit.unwrap_or(defaults.limit),
    )
}
