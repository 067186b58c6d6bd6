//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{catalog::records::SellerUuid, customers::records::CustomerUuid},
    uuids::TypedUuid,
};

/// Administrators are provisioned outside this service; only their ids are known here.
#[derive(Debug)]
pub enum Admin {}

/// Admin UUID
pub type AdminUuid = TypedUuid<Admin>;

/// The kind of caller a token acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Seller,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated caller: a role together with the id it acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Customer(CustomerUuid),
    Seller(SellerUuid),
    Admin(AdminUuid),
}

impl Principal {
    #[must_use]
    pub fn from_parts(role: Role, subject: Uuid) -> Self {
        match role {
            Role::Customer => Self::Customer(CustomerUuid::from_uuid(subject)),
            Role::Seller => Self::Seller(SellerUuid::from_uuid(subject)),
            Role::Admin => Self::Admin(AdminUuid::from_uuid(subject)),
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Customer(_) => Role::Customer,
            Self::Seller(_) => Role::Seller,
            Self::Admin(_) => Role::Admin,
        }
    }

    #[must_use]
    pub fn subject(&self) -> Uuid {
        match self {
            Self::Customer(uuid) => uuid.into_uuid(),
            Self::Seller(uuid) => uuid.into_uuid(),
            Self::Admin(uuid) => uuid.into_uuid(),
        }
    }
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub principal: Principal,

    /// SHA-256 verifier of the token secret material.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub principal: Principal,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: Uuid,
    pub principal: Principal,
    pub token_hash: String,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
