//! Error types for the tagql client.
//!
//! Only infrastructure-level problems surface here: the endpoint could not be
//! reached, the server answered outside the 2xx range, or the body was not a
//! GraphQL payload. A response whose GraphQL execution reported `errors` is
//! NOT a [`GqlError`] — it comes back as [`GqlResponse::Failure`] so callers
//! can inspect partial data.
//!
//! [`GqlResponse::Failure`]: crate::response::GqlResponse::Failure

use http::StatusCode;
use thiserror::Error;

/// Errors produced while constructing a client or executing a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GqlError {
    /// The endpoint URL could not be parsed.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] http::uri::InvalidUri),

    /// A configured header name or value is not representable on the wire.
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The variables value could not be serialized to JSON.
    #[error("failed to serialize variables: {0}")]
    Encode(#[source] serde_json::Error),

    /// The HTTP request itself failed (DNS, connection refused, reset, ...).
    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The response body could not be read to completion.
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),

    /// The server answered with a non-2xx status. The body is not interpreted.
    #[error("server responded with status {0}")]
    Status(StatusCode),

    /// The 2xx response body was not valid JSON, or its `errors` entries did
    /// not match the GraphQL wire convention.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The decoded payload carried neither a `data` nor an `errors` key.
    #[error("response contains neither `data` nor `errors`: {payload}")]
    UnexpectedPayload { payload: String },

    /// Raised by [`GqlResponse::into_data`] when the response was a GraphQL
    /// failure and the caller asked for data anyway.
    ///
    /// [`GqlResponse::into_data`]: crate::response::GqlResponse::into_data
    #[error("graphql execution failed: {message}")]
    Execution { message: String },
}

impl GqlError {
    /// True when the server was reached but rejected the request at the HTTP
    /// layer.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    /// The HTTP status, when this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type GqlResult<T> = std::result::Result<T, GqlError>;
