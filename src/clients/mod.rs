//! Client types for the Vineo GraphQL endpoint.
//!
//! # Overview
//!
//! - [`HttpClient`]: POSTs operations to the endpoint, optionally with a
//!   bearer token
//! - [`HttpResponse`]: a raw response before GraphQL parsing
//! - [`GraphqlOperation`]: a query or mutation with its variables
//! - [`graphql::GraphqlClient`]: the authenticated client with one-shot
//!   refresh-and-retry
//! - [`HttpError`] and [`graphql::ClientError`]: failure types
//!
//! # Retry Behavior
//!
//! Only the authorization-failure signal is retried, once, after a token
//! refresh. Network errors, malformed bodies and other GraphQL errors are
//! returned to the caller immediately. There is no backoff and no timeout.

mod errors;
pub mod graphql;
mod http_client;
mod http_response;
mod operation;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_response::HttpResponse;
pub use operation::GraphqlOperation;

pub use graphql::{ClientError, GraphqlClient, GraphqlErrorEntry, GraphqlResponse};
