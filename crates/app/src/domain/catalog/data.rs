//! Catalog Data

use rust_decimal::Decimal;

use crate::domain::catalog::records::{ListingUuid, ProductUuid, SellerUuid};

/// New Seller
#[derive(Debug, Clone)]
pub struct NewSeller {
    pub uuid: SellerUuid,
    pub name: String,
}

/// New Product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
}

/// New Listing
#[derive(Debug, Clone)]
pub struct NewListing {
    pub uuid: ListingUuid,
    pub seller_uuid: SellerUuid,
    pub product_uuid: ProductUuid,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub stock: u32,
    pub size: String,
}
