//! Error taxonomy shared by the transport, normalizer, and resource clients.

use std::collections::BTreeMap;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Classified failure returned by every fallible operation in this layer.
///
/// Expected failure modes are returned as values, never raised. Only
/// `ValidationFailed` carries structured per-field messages so forms can map
/// errors onto inputs; every other variant is a kind tag plus one
/// human-readable message. Retry policy is deliberately left to callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client-side timeout fired before a response arrived.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// DNS or connection-level failure, no HTTP response was received.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Rejection with per-field messages, either from a server 422 body or
    /// from client-side pre-flight validation.
    #[error("validation failed: {}", summarize_fields(.field_errors))]
    ValidationFailed {
        field_errors: BTreeMap<String, Vec<String>>,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// The body parsed as JSON but matched none of the known wrapper shapes.
    /// Carries only top-level key names so logs never leak payload fields.
    #[error("unrecognized response shape (top-level keys: {keys:?})")]
    MalformedResponse { keys: Vec<String> },

    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// One-line rendering of a field-error map for the Display impl.
fn summarize_fields(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, msgs)| format!("{}: {}", field, msgs.join("; ")))
        .collect::<Vec<_>>()
        .join(", ")
}
