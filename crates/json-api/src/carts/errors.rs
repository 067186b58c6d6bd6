//! Cart Errors

use bazaar_app::domain::{carts::CartsServiceError, checkout::CheckoutServiceError};

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    ApiError::from_service(error.kind(), &error, "cart operation failed")
}

pub(crate) fn checkout_into_api_error(error: CheckoutServiceError) -> ApiError {
    ApiError::from_service(error.kind(), &error, "cart confirmation failed")
}
