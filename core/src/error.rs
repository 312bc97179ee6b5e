//! Error types for the todo client.
//!
//! # Design
//! `ApiError` covers everything that can go wrong once a request has been
//! built: the host could not complete the round-trip (`Transport`), the
//! service answered with a non-2xx status, or a body failed to (de)serialize.
//! `NotFound` keeps its own variant so callers can tell a vanished todo from
//! any other rejection. `ValidationError` is local and synchronous; it is
//! raised before a request exists.

use thiserror::Error;

/// Errors from building requests or interpreting their outcome.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (network unreachable, host I/O failure).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service returned 404: the todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The service returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// A title rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a todo title")]
    EmptyTitle,
}
