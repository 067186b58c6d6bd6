//! Cart Request & Response Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::{
    carts::{
        data::RequestedLine,
        models::{Cart, CartLine},
    },
    checkout::models::{Confirmation, SellerFailure},
    customers::records::CustomerRecord,
    orders::models::Order,
};

/// Requested cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineRequest {
    /// Listing to buy
    pub listing: Uuid,

    /// Number of units, at least one
    pub quantity: u32,
}

/// Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartRequest {
    pub lines: Vec<CartLineRequest>,
}

impl CartRequest {
    pub(crate) fn into_lines(self) -> Vec<RequestedLine> {
        self.lines
            .into_iter()
            .map(|line| RequestedLine::new(line.listing.into(), line.quantity))
            .collect()
    }
}

/// Customer contact details shown with a cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerContactResponse {
    pub uuid: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub telephone_number: String,
}

impl From<CustomerRecord> for CustomerContactResponse {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            uuid: customer.uuid.into(),
            name: customer.name,
            last_name: customer.last_name,
            email: customer.email,
            address: customer.address,
            city: customer.city,
            telephone_number: customer.telephone_number,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub uuid: Uuid,
    pub listing: Uuid,
    pub seller: Option<Uuid>,
    pub product_name: Option<String>,
    pub size: String,

    /// Discount price when set, otherwise list price
    #[salvo(schema(value_type = f64))]
    pub unit_price: Decimal,

    pub quantity: u32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            uuid: line.uuid.into(),
            listing: line.listing.uuid.into(),
            seller: line.listing.seller_uuid.map(Into::into),
            unit_price: line.listing.unit_price(),
            product_name: line.listing.product_name,
            size: line.listing.size,
            quantity: line.quantity,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub customer: CustomerContactResponse,
    pub lines: Vec<CartLineResponse>,

    #[salvo(schema(value_type = f64))]
    pub subtotal: Decimal,

    #[salvo(schema(value_type = f64))]
    pub ship_price: Decimal,

    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,

    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            uuid: cart.uuid.into(),
            customer: cart.customer.into(),
            lines: cart.lines.into_iter().map(Into::into).collect(),
            subtotal: cart.prices.subtotal,
            ship_price: cart.prices.ship_price,
            total_price: cart.prices.total_price,
            is_active: cart.is_active,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Order created by a confirmation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmedOrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub seller: Uuid,

    #[salvo(schema(value_type = f64))]
    pub ship_price: Decimal,

    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,

    pub lines: usize,
}

impl From<Order> for ConfirmedOrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.header.uuid.into(),
            order_number: order.header.order_number,
            seller: order.header.seller_uuid.into(),
            ship_price: order.header.ship_price,
            total_price: order.header.total_price,
            lines: order.details.len(),
        }
    }
}

/// Seller whose order could not be created
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SellerFailureResponse {
    pub seller: Uuid,
    pub reason: String,
}

impl From<SellerFailure> for SellerFailureResponse {
    fn from(failure: SellerFailure) -> Self {
        Self {
            seller: failure.seller.into(),
            reason: failure.reason,
        }
    }
}

/// Confirmation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmationResponse {
    pub cart: Uuid,
    pub orders: Vec<ConfirmedOrderResponse>,
    pub failures: Vec<SellerFailureResponse>,
}

impl From<Confirmation> for ConfirmationResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self {
            cart: confirmation.cart.into(),
            orders: confirmation.orders.into_iter().map(Into::into).collect(),
            failures: confirmation.failures.into_iter().map(Into::into).collect(),
        }
    }
}
