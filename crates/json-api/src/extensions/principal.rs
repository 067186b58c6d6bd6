//! Authenticated principal helpers.

use bazaar_app::{
    auth::{AdminUuid, Principal},
    domain::{catalog::records::SellerUuid, customers::records::CustomerUuid},
};
use salvo::prelude::Depot;

use crate::errors::ApiError;

/// Store and read the principal resolved by the auth middleware.
pub(crate) trait PrincipalExt {
    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<Principal, ApiError>;

    fn customer_or_403(&self) -> Result<CustomerUuid, ApiError> {
        match self.principal_or_401()? {
            Principal::Customer(customer) => Ok(customer),
            Principal::Seller(_) | Principal::Admin(_) => {
                Err(ApiError::forbidden("customer role required"))
            }
        }
    }

    fn seller_or_403(&self) -> Result<SellerUuid, ApiError> {
        match self.principal_or_401()? {
            Principal::Seller(seller) => Ok(seller),
            Principal::Customer(_) | Principal::Admin(_) => {
                Err(ApiError::forbidden("seller role required"))
            }
        }
    }

    fn admin_or_403(&self) -> Result<AdminUuid, ApiError> {
        match self.principal_or_401()? {
            Principal::Admin(admin) => Ok(admin),
            Principal::Customer(_) | Principal::Seller(_) => {
                Err(ApiError::forbidden("admin role required"))
            }
        }
    }
}

impl PrincipalExt for Depot {
    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, ApiError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("authentication required"))
    }
}
