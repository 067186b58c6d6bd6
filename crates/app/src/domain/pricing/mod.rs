//! Pricing: subtotal, shipping and total for a set of cart or order lines.

pub mod engine;
pub mod errors;
pub mod models;

pub use engine::*;
pub use errors::PricingError;
pub use models::*;
