//! The access/refresh credential pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// A bearer access token together with the refresh token that renews it.
///
/// Both values are opaque: the client never decodes them or reads an expiry
/// out of them. A pair only exists when both tokens are non-empty; a store
/// holding just one of them is treated as signed out.
///
/// The [`Debug`] implementation masks both values.
///
/// # Example
///
/// ```rust
/// use vineo_client::CredentialPair;
///
/// let pair = CredentialPair::new("T1", "R1");
/// assert_eq!(pair.access_token(), "T1");
/// assert_eq!(format!("{pair:?}"), "CredentialPair { access_token: *****, refresh_token: ***** }");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    access_token: String,
    refresh_token: String,
}

impl CredentialPair {
    /// Creates a pair from an access token and a refresh token.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Builds a pair from two possibly-missing values.
    ///
    /// Returns `None` unless both tokens are present and non-empty.
    #[must_use]
    pub fn from_parts(access_token: Option<String>, refresh_token: Option<String>) -> Option<Self> {
        match (access_token, refresh_token) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                Some(Self::new(access, refresh))
            }
            _ => None,
        }
    }

    /// Returns `true` if both tokens are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialPair { access_token: *****, refresh_token: ***** }")
    }
}

/// Tokens as returned by the login and refresh operations.
///
/// The refresh operation may omit the refresh token when it does not rotate
/// it, so both fields are optional here.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssuedTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}
