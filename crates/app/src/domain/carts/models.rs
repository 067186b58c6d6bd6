//! Cart Models

use jiff::Timestamp;

use crate::domain::{
    carts::records::{CartLineUuid, CartUuid},
    catalog::records::ListingRecord,
    customers::records::CustomerRecord,
    pricing::{LineItem, PriceDetails},
};

/// Cart Model: the cart with its customer, lines and freshly computed prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub customer: CustomerRecord,
    pub lines: Vec<CartLine>,
    pub prices: PriceDetails,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Line Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub uuid: CartLineUuid,
    pub listing: ListingRecord,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLine {
    #[must_use]
    pub fn line_item(&self) -> LineItem {
        LineItem::from_listing(&self.listing, self.quantity)
    }
}
