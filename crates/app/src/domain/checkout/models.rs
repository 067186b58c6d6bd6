//! Checkout Models

use crate::domain::{
    carts::records::CartUuid, catalog::records::SellerUuid, orders::models::Order,
};

/// A seller whose order could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerFailure {
    pub seller: SellerUuid,
    pub reason: String,
}

/// Outcome of confirming a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub cart: CartUuid,
    pub message: String,
    pub orders: Vec<Order>,
    pub failures: Vec<SellerFailure>,
}

impl Confirmation {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Summary message: full success, or every seller failure joined together.
#[must_use]
pub fn confirmation_message(orders: usize, failures: &[SellerFailure]) -> String {
    if failures.is_empty() {
        return format!("cart confirmed: {orders} order(s) created");
    }

    let notes: Vec<String> = failures
        .iter()
        .map(|failure| format!("seller {}: {}", failure.seller, failure.reason))
        .collect();

    format!(
        "cart confirmed with failures: {orders} order(s) created; {}",
        notes.join("; ")
    )
}
