//! Order Handlers

pub(crate) mod details;
pub(crate) mod index;
pub(crate) mod status;
