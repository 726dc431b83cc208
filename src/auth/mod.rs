//! Authentication for the Vineo client.
//!
//! # Overview
//!
//! - [`CredentialPair`]: the access/refresh token pair
//! - [`SessionStore`]: where the pair lives, with [`MemorySessionStore`] and
//!   [`FileSessionStore`] implementations
//! - [`sign_in`] / [`sign_out`]: the sign-in flow and its inverse
//! - [`refresh`]: the token refresh operation used by
//!   [`GraphqlClient`](crate::GraphqlClient)
//!
//! # Session Lifecycle
//!
//! A pair is created by a successful sign-in, replaced wholesale by every
//! successful refresh, and cleared on sign-out or when the client cannot
//! recover from an authorization failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vineo_client::auth::{sign_in, SignInForm};
//! use vineo_client::{GraphqlClient, MemorySessionStore, Route, VineoConfig};
//!
//! let client = GraphqlClient::new(&VineoConfig::default(), Arc::new(MemorySessionStore::new()));
//! let route = sign_in(&client, &SignInForm::new("a@b.com", "secret")).await?;
//! assert_eq!(route, Route::Dashboard);
//! ```

mod credentials;
mod error;
pub mod refresh;
mod session_store;
mod sign_in;

pub use credentials::{CredentialPair, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use error::{RefreshError, SignInError};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use sign_in::{field_message, sign_in, sign_out, SignInForm, LOGIN_QUERY};
pub use validator::{Validate, ValidationErrors};
