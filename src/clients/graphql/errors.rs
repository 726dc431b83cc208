//! Error type for GraphQL operations.
//!
//! # Error Handling
//!
//! - [`ClientError::Unauthenticated`]: credentials are missing or could not
//!   be renewed; the store has been cleared and the user must sign in again
//! - [`ClientError::Transport`]: the endpoint could not be reached or
//!   answered with a bare HTTP error
//! - [`ClientError::Decode`]: the body was not the expected JSON
//! - [`ClientError::ServerRejected`]: a well-formed GraphQL error other than
//!   the 401 signal
//!
//! # Example
//!
//! ```rust,ignore
//! use vineo_client::{ClientError, Route};
//!
//! match client.execute(&operation).await {
//!     Ok(response) => println!("{}", response.data),
//!     Err(ClientError::Unauthenticated) => navigate(Route::SignIn),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

use crate::clients::errors::HttpError;
use crate::clients::graphql::response::GraphqlErrorEntry;
use thiserror::Error;

/// Error type for operations sent through [`GraphqlClient`](crate::GraphqlClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable credentials remain.
    ///
    /// Returned after a failed refresh or a failed retry; the session store
    /// has already been cleared when this is returned from
    /// [`GraphqlClient::execute`](crate::GraphqlClient::execute).
    #[error("Not authenticated: sign in again")]
    Unauthenticated,

    /// Network failure or a non-2xx status without a GraphQL body.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with GraphQL errors.
    #[error("Request rejected by server: {message}")]
    ServerRejected {
        /// Messages of all error entries, joined with `; `.
        message: String,
        /// The error entries as received.
        errors: Vec<GraphqlErrorEntry>,
    },
}

impl ClientError {
    /// Returns `true` for [`ClientError::Unauthenticated`].
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Returns a message suitable for showing to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "Your session has expired. Please sign in again.",
            Self::Transport(_) => "We could not reach Vineo. Please try again later.",
            Self::Decode(_) => "Something went wrong. Please try again.",
            Self::ServerRejected { .. } => "The request could not be completed.",
        }
    }
}
