//! Customer Data

use crate::domain::customers::records::CustomerUuid;

/// New Customer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub telephone_number: String,
}
