//! Order Data

use crate::domain::{
    carts::records::CartUuid,
    catalog::records::{ListingUuid, SellerUuid},
    customers::records::CustomerUuid,
};

/// One line of a seller's share of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCartLine {
    pub listing: ListingUuid,
    pub quantity: u32,
}

/// The lines of one cart that belong to a single seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerSubCart {
    pub cart: CartUuid,
    pub customer: CustomerUuid,
    pub seller: SellerUuid,
    pub lines: Vec<SubCartLine>,
}

/// Which orders a listing query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    Customer(CustomerUuid),
    Seller(SellerUuid),
    All,
}

/// 1-based page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.page >= 1 && (1..=Self::MAX_LIMIT).contains(&self.limit)
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}
