//! Validated newtype wrappers for configuration values.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The GraphQL endpoint used for the hosted QA backend.
pub const DEFAULT_ENDPOINT: &str = "https://vineoback-gh-qa.caprover2.innogenio.com/graphql";

/// A validated GraphQL endpoint URL.
///
/// The URL must use the `http` or `https` scheme and name a host. Every
/// operation the client sends is POSTed to this single URL.
///
/// # Example
///
/// ```rust
/// use vineo_client::GraphqlEndpoint;
///
/// let endpoint = GraphqlEndpoint::new("https://api.example.com/graphql").unwrap();
/// assert_eq!(endpoint.scheme(), "https");
/// assert_eq!(endpoint.host_name(), "api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphqlEndpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl GraphqlEndpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no `http`/`https`
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let invalid = |url: &str| ConfigError::InvalidEndpoint {
            url: url.to_string(),
        };

        let scheme_end = url.find("://").ok_or_else(|| invalid(&url))?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid(&url));
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(invalid(&url));
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for GraphqlEndpoint {
    fn default() -> Self {
        let host_start = "https://".len();
        let host_end = DEFAULT_ENDPOINT[host_start..]
            .find('/')
            .map_or(DEFAULT_ENDPOINT.len(), |i| host_start + i);
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            scheme_end: "https".len(),
            host_start,
            host_end,
        }
    }
}

impl AsRef<str> for GraphqlEndpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for GraphqlEndpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for GraphqlEndpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
