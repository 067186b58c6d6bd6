//! Customer Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Customer UUID
pub type CustomerUuid = TypedUuid<CustomerRecord>;

/// Customer Record
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub uuid: CustomerUuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub telephone_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
