//! Orders: single-seller purchase records split out of a confirmed cart.

pub mod data;
pub mod errors;
pub mod factory;
pub mod models;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::{OrderFactoryError, OrdersServiceError};
pub use factory::*;
pub use service::*;
