//! Error types for the Vineo client.
//!
//! This module contains the configuration error type used by the config
//! builder and its validated newtypes.
//!
//! # Example
//!
//! ```rust
//! use vineo_client::{ConfigError, GraphqlEndpoint};
//!
//! let result = GraphqlEndpoint::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building the client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The GraphQL endpoint URL is invalid.
    #[error("Invalid GraphQL endpoint '{url}'. Expected an http(s) URL such as 'https://api.example.com/graphql'.")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The box-history page size must be at least one.
    #[error("Invalid page size {size}. The page size must be at least 1.")]
    InvalidPageSize {
        /// The rejected page size.
        size: u32,
    },
}
