//! tagql — a template-tag GraphQL client over HTTP.
//!
//! Build a handle once from an endpoint URL, then fire queries written as
//! interpolated templates:
//!
//! ```ignore
//! use tagql::{gql, Gql, GqlOptions, GqlResponse};
//!
//! let gql = Gql::with_options(
//!     "http://localhost:4000/graphql",
//!     GqlOptions::new().header("Authorization", "Bearer token"),
//! )?;
//!
//! let name = "world";
//! let response = gql
//!     .query(gql!("query Hello($greeting: String) { hello(name: ${name}) }"))
//!     .variables(serde_json::json!({ "greeting": "hi" }))?
//!     .send()
//!     .await?;
//!
//! match response {
//!     GqlResponse::Success { data } => println!("{data}"),
//!     GqlResponse::Failure { errors, .. } => eprintln!("{} errors", errors.len()),
//! }
//! ```
//!
//! Exactly one HTTP request is made per [`QueryRequest::send`]; handles are
//! `Clone` and safe to use concurrently. Infrastructure failures (transport,
//! non-2xx status, undecodable or shapeless payloads) are `Err(GqlError)`;
//! GraphQL execution errors are `Ok(GqlResponse::Failure { .. })`.

pub mod client;
pub mod error;
pub(crate) mod http;
pub mod query;
pub mod response;

// Re-export the query tag macro
pub use tagql_macros::gql;

// Re-exports for convenience
pub use client::{Gql, GqlOptions, QueryRequest};
pub use error::{GqlError, GqlResult};
pub use response::{GqlResponse, GraphQlError};
