//! The request builder: endpoint configuration, the query tag, and dispatch.
//!
//! A [`Gql`] handle closes over an endpoint URL and immutable options. Calling
//! [`Gql::query`] with an (already interpolated) query string yields a
//! [`QueryRequest`]; sending it performs exactly one HTTP round trip and
//! normalizes the answer.
//!
//! Error signaling is split deliberately, because the lineage this client
//! descends from was inconsistent about it: infrastructure problems (non-2xx
//! status, undecodable body, unexpected payload shape, transport failure) are
//! `Err(GqlError)`, while GraphQL execution errors are a normal negative
//! outcome returned as `Ok(GqlResponse::Failure { .. })`.
//!
//! ```ignore
//! let gql = Gql::new("http://localhost:4000/graphql")?;
//!
//! let response = gql
//!     .query(gql!("query { hello(name: ${name}) }"))
//!     .send()
//!     .await?;
//!
//! if let GqlResponse::Success { data } = response {
//!     println!("{data}");
//! }
//! ```

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, Uri};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{GqlError, GqlResult};
use crate::http::Transport;
use crate::response::GqlResponse;

/// Construction-time options: HTTP method and default headers.
///
/// Captured once by [`Gql::with_options`] and immutable afterwards. Headers
/// given here are merged over the implicit `content-type: application/json`,
/// so callers can override the content type as well as add their own headers
/// (an `Authorization` header for authenticated endpoints, for instance).
#[derive(Debug, Clone, Default)]
pub struct GqlOptions {
    method: Option<Method>,
    headers: HashMap<String, String>,
}

impl GqlOptions {
    /// Creates empty options: POST, no extra headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method used for every request (default `POST`).
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a default header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Outbound request body, standard GraphQL-over-HTTP shape.
///
/// `variables` and `operationName` are omitted from the wire entirely when
/// absent, never serialized as `null`.
#[derive(Debug, Serialize)]
struct RequestBody {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    operation_name: Option<String>,
}

/// A GraphQL endpoint handle.
///
/// Cheap to clone; clones share the underlying connection pool and the
/// immutable configuration, so concurrent requests from any number of clones
/// are independent.
#[derive(Clone)]
pub struct Gql {
    inner: Arc<Shared>,
}

struct Shared {
    uri: Uri,
    method: Method,
    headers: HeaderMap,
    transport: Transport,
}

impl Gql {
    /// Creates a handle for `url` with default options (POST, JSON content type).
    pub fn new(url: impl AsRef<str>) -> GqlResult<Self> {
        Self::with_options(url, GqlOptions::new())
    }

    /// Creates a handle for `url` with the given options.
    ///
    /// Fails if the URL does not parse or a configured header is not
    /// representable; nothing is validated later, so a constructed handle
    /// cannot fail on configuration at send time.
    pub fn with_options(url: impl AsRef<str>, options: GqlOptions) -> GqlResult<Self> {
        let uri: Uri = url.as_ref().parse()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &options.headers {
            let name: HeaderName = name.parse().map_err(|e| GqlError::InvalidHeader {
                name: name.clone(),
                reason: format!("{e}"),
            })?;
            let value: HeaderValue = value.parse().map_err(|e| GqlError::InvalidHeader {
                name: name.to_string(),
                reason: format!("{e}"),
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            inner: Arc::new(Shared {
                uri,
                method: options.method.unwrap_or(Method::POST),
                headers,
                transport: Transport::new(),
            }),
        })
    }

    /// Returns an equivalent handle.
    ///
    /// Exists so call sites can bind the conventional name in one move:
    /// `let gql = Gql::new(url)?.gql();`. The returned handle shares the same
    /// configuration and connection pool.
    pub fn gql(&self) -> Gql {
        self.clone()
    }

    /// The query tag: captures a query string and yields a sendable request.
    ///
    /// Pairs with the [`gql!`](crate::gql) interpolation macro, but any
    /// string works.
    pub fn query(&self, query: impl Into<String>) -> QueryRequest {
        QueryRequest {
            gql: self.clone(),
            body: RequestBody {
                query: query.into(),
                variables: None,
                operation_name: None,
            },
            headers: HeaderMap::new(),
        }
    }
}

impl std::fmt::Debug for Gql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gql")
            .field("uri", &self.inner.uri)
            .field("method", &self.inner.method)
            .finish_non_exhaustive()
    }
}

/// One pending GraphQL request: a captured query plus per-call extras.
///
/// [`send`](Self::send) consumes the request and performs exactly one HTTP
/// call; there is no shared mutable state with the originating [`Gql`].
#[derive(Debug)]
pub struct QueryRequest {
    gql: Gql,
    body: RequestBody,
    headers: HeaderMap,
}

impl QueryRequest {
    /// Attaches variables, serialized immediately so a bad value surfaces
    /// before any network traffic.
    pub fn variables(mut self, variables: impl Serialize) -> GqlResult<Self> {
        self.body.variables = Some(serde_json::to_value(variables).map_err(GqlError::Encode)?);
        Ok(self)
    }

    /// Sets the `operationName` sent alongside the query.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.body.operation_name = Some(name.into());
        self
    }

    /// Adds a header for this request only, merged over the handle's defaults.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sends the request and normalizes the response.
    ///
    /// Returns `Ok` for any well-formed GraphQL answer, including execution
    /// failures; see the module docs for the error-signaling split.
    pub async fn send(self) -> GqlResult<GqlResponse> {
        let shared = &self.gql.inner;

        let mut headers = shared.headers.clone();
        headers.extend(self.headers);

        let body = serde_json::to_vec(&self.body).map_err(GqlError::Encode)?;
        debug!(
            query = %self.body.query.chars().take(100).collect::<String>(),
            "dispatching graphql request"
        );

        let (status, raw) = shared
            .transport
            .send(
                shared.method.clone(),
                shared.uri.clone(),
                headers,
                Bytes::from(body),
            )
            .await?;

        if !status.is_success() {
            return Err(GqlError::Status(status));
        }

        let payload: serde_json::Value =
            serde_json::from_slice(&raw).map_err(GqlError::Decode)?;
        GqlResponse::from_payload(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_method_is_post() {
        let gql = Gql::new("http://localhost:4000/graphql").unwrap();
        assert_eq!(gql.inner.method, Method::POST);
    }

    #[test]
    fn options_override_method_and_add_headers() {
        let gql = Gql::with_options(
            "http://localhost:4000/graphql",
            GqlOptions::new()
                .method(Method::PUT)
                .header("Authorization", "Bearer token"),
        )
        .unwrap();

        assert_eq!(gql.inner.method, Method::PUT);
        // HeaderMap normalizes casing.
        assert_eq!(
            gql.inner.headers.get("authorization").unwrap(),
            "Bearer token"
        );
        assert_eq!(
            gql.inner.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn caller_headers_can_override_content_type() {
        let gql = Gql::with_options(
            "http://localhost:4000/graphql",
            GqlOptions::new().header("content-type", "application/json;charset=utf-8"),
        )
        .unwrap();
        assert_eq!(
            gql.inner.headers.get(CONTENT_TYPE).unwrap(),
            "application/json;charset=utf-8"
        );
    }

    #[test]
    fn invalid_url_is_rejected_at_construction() {
        assert!(matches!(
            Gql::new("http://exa mple.com"),
            Err(GqlError::InvalidUrl(_))
        ));
    }

    #[test]
    fn invalid_header_is_rejected_at_construction() {
        let err = Gql::with_options(
            "http://localhost:4000/graphql",
            GqlOptions::new().header("bad header", "x"),
        )
        .unwrap_err();
        assert!(matches!(err, GqlError::InvalidHeader { .. }));
    }

    #[test]
    fn gql_accessor_shares_configuration() {
        let handle = Gql::new("http://localhost:4000/graphql").unwrap();
        let gql = handle.gql();
        assert!(Arc::ptr_eq(&handle.inner, &gql.inner));
    }

    #[test]
    fn variables_are_omitted_from_the_body_when_absent() {
        let body = RequestBody {
            query: "query { hello }".to_string(),
            variables: None,
            operation_name: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"query":"query { hello }"}"#);
    }

    #[test]
    fn variables_are_sent_verbatim_when_present() {
        let gql = Gql::new("http://localhost:4000/graphql").unwrap();
        let req = gql
            .query("query { hello }")
            .variables(serde_json::json!({"id": 1}))
            .unwrap()
            .operation_name("Hello");

        let json = serde_json::to_string(&req.body).unwrap();
        assert_eq!(
            json,
            r#"{"query":"query { hello }","variables":{"id":1},"operationName":"Hello"}"#
        );
    }

    #[test]
    fn unserializable_variables_fail_before_send() {
        struct Bad;
        impl Serialize for Bad {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("nope"))
            }
        }

        let gql = Gql::new("http://localhost:4000/graphql").unwrap();
        let err = gql.query("query { hello }").variables(Bad).unwrap_err();
        assert!(matches!(err, GqlError::Encode(_)));
    }
}
