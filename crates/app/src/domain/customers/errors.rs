//! Customers service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as DbErrorKind},
};
use thiserror::Error;

use crate::errors::ErrorKind;

#[derive(Debug, Error)]
pub enum CustomersServiceError {
    #[error("customer already exists")]
    AlreadyExists,

    #[error("customer not found")]
    NotFound,

    #[error("invalid customer data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CustomersServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists => ErrorKind::Conflict,
            Self::NotFound => ErrorKind::NotFound,
            Self::InvalidData => ErrorKind::Invalid,
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}

impl From<Error> for CustomersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(DbErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(DbErrorKind::NotNullViolation | DbErrorKind::CheckViolation) => {
                Self::InvalidData
            }
            Some(_) | None => Self::Sql(error),
        }
    }
}
