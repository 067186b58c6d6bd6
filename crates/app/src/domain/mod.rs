//! Marketplace Domain Concerns

pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod inventory;
pub mod orders;
pub mod pricing;

mod columns;
