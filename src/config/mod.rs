//! Configuration types for the Vineo client.
//!
//! # Overview
//!
//! - [`VineoConfig`]: the settings shared by every client instance
//! - [`VineoConfigBuilder`]: a builder for constructing [`VineoConfig`]
//! - [`GraphqlEndpoint`]: a validated GraphQL endpoint URL
//!
//! # Example
//!
//! ```rust
//! use vineo_client::{GraphqlEndpoint, VineoConfig};
//!
//! let config = VineoConfig::builder()
//!     .endpoint(GraphqlEndpoint::new("https://api.example.com/graphql").unwrap())
//!     .page_size(8)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size(), 8);
//! ```

mod newtypes;

pub use newtypes::{GraphqlEndpoint, DEFAULT_ENDPOINT};

use crate::error::ConfigError;

/// Number of boxes requested per box-history page.
pub const DEFAULT_PAGE_SIZE: u32 = 4;

/// Configuration for the Vineo client.
///
/// `VineoConfig` is `Clone + Send + Sync` and is meant to be built once and
/// handed to [`GraphqlClient::new`](crate::GraphqlClient::new).
#[derive(Clone, Debug)]
pub struct VineoConfig {
    endpoint: GraphqlEndpoint,
    user_agent_prefix: Option<String>,
    page_size: u32,
    share_refresh: bool,
}

impl VineoConfig {
    /// Creates a new builder for constructing a `VineoConfig`.
    #[must_use]
    pub fn builder() -> VineoConfigBuilder {
        VineoConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &GraphqlEndpoint {
        &self.endpoint
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the number of boxes requested per box-history page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns whether concurrent requests share one in-flight token refresh.
    #[must_use]
    pub const fn share_refresh(&self) -> bool {
        self.share_refresh
    }
}

impl Default for VineoConfig {
    fn default() -> Self {
        Self {
            endpoint: GraphqlEndpoint::default(),
            user_agent_prefix: None,
            page_size: DEFAULT_PAGE_SIZE,
            share_refresh: true,
        }
    }
}

// Verify VineoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VineoConfig>();
};

/// Builder for constructing [`VineoConfig`] instances.
///
/// # Defaults
///
/// - `endpoint`: [`DEFAULT_ENDPOINT`]
/// - `user_agent_prefix`: `None`
/// - `page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `share_refresh`: `true`
#[derive(Debug, Default)]
pub struct VineoConfigBuilder {
    endpoint: Option<GraphqlEndpoint>,
    user_agent_prefix: Option<String>,
    page_size: Option<u32>,
    share_refresh: Option<bool>,
}

impl VineoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: GraphqlEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of boxes requested per box-history page.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets whether concurrent authorization failures share a single refresh.
    ///
    /// When disabled, every request that hits the 401-signal runs its own
    /// refresh call and the last writer wins in the session store.
    #[must_use]
    pub const fn share_refresh(mut self, share: bool) -> Self {
        self.share_refresh = Some(share);
        self
    }

    /// Builds the [`VineoConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] if the page size is zero.
    pub fn build(self) -> Result<VineoConfig, ConfigError> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize { size: page_size });
        }

        Ok(VineoConfig {
            endpoint: self.endpoint.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            page_size,
            share_refresh: self.share_refresh.unwrap_or(true),
        })
    }
}
