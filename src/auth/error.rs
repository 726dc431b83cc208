//! Authentication error types.
//!
//! - [`RefreshError`]: why the refresh procedure did not produce new tokens
//! - [`SignInError`]: everything the sign-in flow can report
//!
//! Form validation failures are [`validator::ValidationErrors`], one entry
//! per failing field.
//!
//! # Example
//!
//! ```rust
//! use vineo_client::auth::{field_message, SignInError, SignInForm, Validate};
//!
//! let form = SignInForm::new("not-an-email", "");
//! let errors = form.validate().unwrap_err();
//! assert_eq!(field_message(&errors, "email").as_deref(), Some("Please enter a valid email"));
//! assert_eq!(field_message(&errors, "password").as_deref(), Some("Password is required"));
//!
//! let error = SignInError::from(errors);
//! assert!(matches!(error, SignInError::Invalid(_)));
//! ```

use crate::clients::ClientError;
use thiserror::Error;
use validator::ValidationErrors;

/// Failure of the token refresh procedure.
///
/// Any of these leads the client to clear the session store.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The store did not hold both tokens, so nothing was sent.
    #[error("No credential pair available to refresh")]
    MissingCredentials,

    /// The refresh operation itself came back with the 401 signal.
    #[error("Refresh token was rejected")]
    Rejected,

    /// The refresh request failed or its body could not be read.
    #[error("Refresh request failed: {0}")]
    Request(#[from] ClientError),

    /// The response did not contain a new access token.
    #[error("Refresh response did not contain a new access token")]
    MissingAccessToken,
}

/// Errors reported by [`sign_in`](crate::auth::sign_in).
#[derive(Debug, Error)]
pub enum SignInError {
    /// The form failed local validation; nothing was sent.
    #[error("Invalid sign-in form: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The server refused the email/password combination.
    #[error("Login failed: invalid email or password")]
    InvalidCredentials,

    /// The login request could not be completed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl SignInError {
    /// Returns the single message shown above the sign-in form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "Please correct the highlighted fields.",
            Self::InvalidCredentials => "Login failed: invalid email or password",
            Self::Client(e) => e.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_error_user_messages() {
        assert_eq!(
            SignInError::InvalidCredentials.user_message(),
            "Login failed: invalid email or password"
        );
        assert_eq!(
            SignInError::Client(ClientError::Unauthenticated).user_message(),
            ClientError::Unauthenticated.user_message()
        );
    }

    #[test]
    fn test_refresh_error_wraps_client_error() {
        let error: RefreshError = ClientError::Unauthenticated.into();
        assert!(matches!(error, RefreshError::Request(_)));
    }
}
