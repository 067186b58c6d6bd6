//! Checkout: confirm an active cart into one order per seller.

pub mod errors;
pub mod models;
pub mod partition;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
