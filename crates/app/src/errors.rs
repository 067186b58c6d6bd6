//! Error classification shared by the services.

/// Coarse category of a service failure.
///
/// Callers choose their response from the kind alone; the concrete error carries the
/// human-readable detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced record does not exist or is not visible to the caller.
    NotFound,

    /// The caller does not own the record or the record no longer accepts the operation.
    Forbidden,

    /// A business rule rejected the input.
    Invalid,

    /// The operation conflicts with existing state.
    Conflict,

    /// Unexpected storage failure.
    Internal,
}
