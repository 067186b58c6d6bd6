//! Order Errors

use bazaar_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    ApiError::from_service(error.kind(), &error, "order operation failed")
}
