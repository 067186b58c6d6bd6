//! Response envelopes.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Successful single-resource response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub(crate) fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Successful list response with pagination.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageEnvelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Failed response; `data` is always null.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
