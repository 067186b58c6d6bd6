//! Inventory gate: stock validation and decrement against seller listings.

pub mod errors;
pub mod gate;

pub use errors::InventoryError;
pub use gate::*;
