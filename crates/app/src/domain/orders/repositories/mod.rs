//! Order Repositories

mod details;
mod orders;

pub(crate) use details::{NewOrderDetail, PgOrderDetailsRepository};
pub(crate) use orders::{NewOrderHeader, PgOrdersRepository};
