//! # Vineo Client
//!
//! Client core for the Vineo wine subscription: session storage, a GraphQL
//! client that recovers from expired access tokens, sign-in, route guarding
//! and the dashboard's box history.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`VineoConfig`] and [`VineoConfigBuilder`]
//! - Credential storage via [`SessionStore`], in memory or in a JSON file
//! - A [`GraphqlClient`] that attaches the bearer token, and on the
//!   authorization-failure signal refreshes the pair once and retries once
//! - Email/password sign-in and sign-out via [`auth`]
//! - Route guarding via [`guard`]
//! - Paginated box history and subscription status via [`dashboard`]
//!
//! ## Quick Start
//!
//! ```rust
//! use vineo_client::{GraphqlEndpoint, VineoConfig};
//!
//! let config = VineoConfig::builder()
//!     .endpoint(GraphqlEndpoint::new("https://api.vineo.example/graphql").unwrap())
//!     .page_size(4)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint().host_name(), "api.vineo.example");
//! ```
//!
//! ## Signing In
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vineo_client::auth::{sign_in, SignInForm};
//! use vineo_client::{FileSessionStore, GraphqlClient, VineoConfig};
//!
//! let store = Arc::new(FileSessionStore::new("vineo-session.json"));
//! let client = GraphqlClient::new(&VineoConfig::default(), store);
//!
//! let route = sign_in(&client, &SignInForm::new("a@b.com", "secret")).await?;
//! // route == Route::Dashboard
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use vineo_client::{ClientError, GraphqlOperation, Route};
//!
//! let op = GraphqlOperation::new("mutation getSubscriptionStatus { getSubscriptionStatus { status } }");
//! match client.execute(&op).await {
//!     Ok(response) => println!("{}", response.data),
//!     Err(ClientError::Unauthenticated) => navigate(Route::SignIn),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and the session store are passed
//!   explicitly
//! - **Fail-fast validation**: the endpoint and page size are checked on
//!   construction
//! - **Thread-safe**: the client and stores are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **Opaque tokens**: credentials are never decoded or inspected

pub mod auth;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod routes;

// Re-export public types at crate root for convenience
pub use auth::{CredentialPair, FileSessionStore, MemorySessionStore, SessionStore};
pub use config::{GraphqlEndpoint, VineoConfig, VineoConfigBuilder, DEFAULT_ENDPOINT};
pub use error::ConfigError;
pub use routes::{guard, Route};

// Re-export client types
pub use clients::{
    ClientError, GraphqlClient, GraphqlErrorEntry, GraphqlOperation, GraphqlResponse, HttpClient,
    HttpError, HttpResponse, HttpResponseError,
};

// Re-export dashboard types
pub use dashboard::{BoxHistoryPager, BoxRecord, Dashboard, DashboardView, SubscriptionStatus, Wine};
