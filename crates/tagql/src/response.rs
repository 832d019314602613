//! Response normalization.
//!
//! A 2xx GraphQL response decodes into a [`GqlResponse`]: `Success` when the
//! payload has `data` and no reported errors, `Failure` when the execution
//! reported errors (possibly alongside partial data). Anything else — non-2xx
//! status, undecodable body, a payload with neither key — never reaches this
//! type; those are [`GqlError`]s raised by the client.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{GqlError, GqlResult};

/// A single error from the GraphQL `errors` array, standard wire convention.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<Value>,
    #[serde(default)]
    pub extensions: Option<HashMap<String, Value>>,
}

/// Outcome of a GraphQL request whose transport and decoding succeeded.
///
/// Discriminates GraphQL-semantic success from GraphQL-semantic failure; both
/// are `Ok` at the [`GqlResult`] level. A non-empty `errors` array makes the
/// response a `Failure` even when partial `data` is present. An empty or
/// absent `errors` array with a `data` key present is a `Success`, `data` may
/// be JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum GqlResponse {
    Success {
        data: Value,
    },
    Failure {
        data: Option<Value>,
        errors: Vec<GraphQlError>,
    },
}

impl GqlResponse {
    /// Normalizes a decoded 2xx payload.
    ///
    /// Key presence governs: `{"data": null}` is a success carrying `null`,
    /// while a payload with neither `data` nor `errors` (including non-object
    /// payloads) is a shape error embedding the serialized payload.
    pub(crate) fn from_payload(payload: Value) -> GqlResult<Self> {
        let Value::Object(mut map) = payload else {
            return Err(unexpected(&payload));
        };

        let data = map.remove("data");
        let errors = match map.remove("errors") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                serde_json::from_value::<Vec<GraphQlError>>(raw).map_err(GqlError::Decode)?,
            ),
        };

        match (data, errors) {
            (Some(data), None) => Ok(Self::Success { data }),
            (Some(data), Some(errors)) if errors.is_empty() => Ok(Self::Success { data }),
            (data, Some(errors)) => Ok(Self::Failure { data, errors }),
            (None, None) => Err(unexpected(&Value::Object(map))),
        }
    }

    /// True for [`GqlResponse::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The `data` payload, if any was returned (present on `Success`, and on
    /// `Failure` when the server produced partial data).
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { data, .. } => data.as_ref(),
        }
    }

    /// The reported errors; empty on `Success`.
    pub fn errors(&self) -> &[GraphQlError] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors, .. } => errors,
        }
    }

    /// Extracts the data, converting a GraphQL failure into [`GqlError::Execution`]
    /// with the first error's message (or a generic message when the errors
    /// array was empty).
    pub fn into_data(self) -> GqlResult<Value> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { errors, .. } => Err(GqlError::Execution {
                message: errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "no data in response".to_string()),
            }),
        }
    }
}

fn unexpected(payload: &Value) -> GqlError {
    GqlError::UnexpectedPayload {
        payload: payload.to_string(),
    }
}
