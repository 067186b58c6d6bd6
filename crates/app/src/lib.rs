//! Marketplace domain, persistence and checkout pipeline.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod errors;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
