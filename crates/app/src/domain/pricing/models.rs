//! Pricing Models

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::catalog::records::{ListingRecord, ListingUuid};

/// Price fields of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPrice {
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
}

impl ListingPrice {
    /// Discount price when present, otherwise the list price. A zero discount is a free line.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }
}

impl From<&ListingRecord> for ListingPrice {
    fn from(listing: &ListingRecord) -> Self {
        Self {
            price: listing.price,
            discount_price: listing.discount_price,
        }
    }
}

/// A line to price. `price` is `None` when the listing has not been loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub listing: ListingUuid,
    pub quantity: u32,
    pub price: Option<ListingPrice>,
}

impl LineItem {
    #[must_use]
    pub fn unloaded(listing: ListingUuid, quantity: u32) -> Self {
        Self {
            listing,
            quantity,
            price: None,
        }
    }

    #[must_use]
    pub fn from_listing(listing: &ListingRecord, quantity: u32) -> Self {
        Self {
            listing: listing.uuid,
            quantity,
            price: Some(listing.into()),
        }
    }
}

/// Derived prices of a cart or order. Never stored authoritatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceDetails {
    pub subtotal: Decimal,
    pub ship_price: Decimal,
    pub total_price: Decimal,
}
