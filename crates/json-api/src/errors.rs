//! API error responses.

use std::fmt::{Debug, Display};

use bazaar_app::errors::ErrorKind;
use salvo::{
    http::StatusCode,
    oapi::{self, Components, EndpointOutRegister, Operation},
    prelude::*,
};
use tracing::error;

use crate::envelope::ErrorEnvelope;

/// A failed request, rendered as an envelope with `success: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    /// Map a classified service error to its response. Internal errors are logged with their
    /// source and replaced by a generic message.
    pub(crate) fn from_service<E>(kind: ErrorKind, error: &E, context: &str) -> Self
    where
        E: Display + Debug,
    {
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Invalid => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => {
                error!(error = ?error, "{context}");

                return Self::internal();
            }
        };

        Self::new(status, error.to_string())
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorEnvelope::new(self.message)));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::FORBIDDEN, "Forbidden"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation
                .responses
                .insert(status.as_str(), oapi::Response::new(description));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("cart has no lines")]
    struct EmptyCart;

    #[test]
    fn kinds_map_to_statuses() {
        for (kind, status) in [
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::Forbidden, StatusCode::FORBIDDEN),
            (ErrorKind::Invalid, StatusCode::BAD_REQUEST),
            (ErrorKind::Conflict, StatusCode::CONFLICT),
            (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            assert_eq!(ApiError::from_service(kind, &EmptyCart, "test").status(), status);
        }
    }

    #[test]
    fn internal_errors_hide_their_message() {
        let error = ApiError::from_service(ErrorKind::Internal, &EmptyCart, "test");

        assert_eq!(error, ApiError::internal());
    }
}
