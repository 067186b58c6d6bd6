//! Catalog Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Seller UUID
pub type SellerUuid = TypedUuid<SellerRecord>;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Listing UUID
pub type ListingUuid = TypedUuid<ListingRecord>;

/// Seller Record
#[derive(Debug, Clone, PartialEq)]
pub struct SellerRecord {
    pub uuid: SellerUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A seller's offer of a product at a price, with its own stock.
///
/// `seller_uuid` and `product_uuid` are `None` when the related row has been
/// soft-deleted after the listing was created.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub uuid: ListingUuid,
    pub seller_uuid: Option<SellerUuid>,
    pub product_uuid: Option<ProductUuid>,
    pub product_name: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub stock: u32,
    pub size: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ListingRecord {
    /// Price charged per unit: the discount price when present, otherwise the list price.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }
}
