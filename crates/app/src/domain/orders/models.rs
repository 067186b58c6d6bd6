//! Order Models

use crate::domain::{
    orders::{
        data::PageRequest,
        records::{OrderDetailRecord, OrderRecord},
    },
    pricing::PriceDetails,
};

/// Order with its line snapshots, as produced by the order factory.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub header: OrderRecord,
    pub details: Vec<OrderDetailRecord>,
    pub prices: PriceDetails,
}

/// One page of results and the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }
}
