//! Cart Data

use crate::domain::catalog::records::ListingUuid;

/// A listing and quantity the customer wants in their cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedLine {
    pub listing: ListingUuid,
    pub quantity: u32,
}

impl RequestedLine {
    #[must_use]
    pub fn new(listing: ListingUuid, quantity: u32) -> Self {
        Self { listing, quantity }
    }
}
