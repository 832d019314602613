//! One-shot HTTP dispatch over the hyper client stack.
//!
//! Plain HTTP/1 only; TLS termination is out of scope for this client. The
//! transport is shared behind the [`Gql`](crate::client::Gql) handle, so
//! cloned handles reuse one connection pool.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::error::GqlResult;

pub(crate) struct Transport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl Transport {
    pub(crate) fn new() -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    /// Sends a single request and returns the status plus the collected body.
    ///
    /// No retries, no redirects, no interpretation of the body. Transport and
    /// body-read failures propagate unmodified.
    pub(crate) async fn send(
        &self,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> GqlResult<(StatusCode, Bytes)> {
        let mut request = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(body))
            .expect("valid request parts");
        *request.headers_mut() = headers;

        let response = self.client.request(request).await?;
        let status = response.status();
        debug!(status = %status, "received response");

        let body = response.into_body().collect().await?.to_bytes();
        Ok((status, body))
    }
}
