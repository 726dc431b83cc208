//! GraphQL client for the Vineo backend.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: sends operations with bearer authentication and
//!   recovers once from an expired access token
//! - [`GraphqlResponse`]: the parsed `data`/`errors`/`extensions` body
//! - [`GraphqlErrorEntry`]: one GraphQL error, with access to the nested
//!   status code the backend uses for authorization failures
//! - [`ClientError`]: what an operation can fail with
//!
//! # Authorization Failures
//!
//! The backend does not use HTTP 401. It returns a GraphQL error whose
//! `extensions.response.statusCode` is 401. On that signal the client runs
//! the refresh operation, stores the new pair and resends the original
//! operation exactly once. If the refresh or the resend fails, the session
//! store is cleared and [`ClientError::Unauthenticated`] is returned; the
//! caller is expected to send the user to [`Route::SignIn`](crate::Route::SignIn).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use serde_json::json;
//! use vineo_client::{FileSessionStore, GraphqlClient, GraphqlOperation, VineoConfig};
//!
//! let store = Arc::new(FileSessionStore::new("session.json"));
//! let client = GraphqlClient::new(&VineoConfig::default(), store);
//!
//! let op = GraphqlOperation::new("query BoxHistory($payload: BoxHistoryDto!) { getBoxHistory(payload: $payload) { box_count } }")
//!     .with_variables(json!({ "payload": { "page": 1, "limit": 4 } }));
//! let response = client.execute(&op).await?;
//! ```

mod client;
mod errors;
mod response;

pub use client::GraphqlClient;
pub use errors::ClientError;
pub use response::{GraphqlErrorEntry, GraphqlResponse, UNAUTHORIZED_STATUS};

pub(crate) use response::Reply;
