//! Email/password sign-in and sign-out.
//!
//! The form is validated locally first; an invalid form never reaches the
//! server. A valid form is sent with the `userLogin` operation through
//! [`GraphqlClient::execute_unauthenticated`], and the returned pair is
//! written to the client's session store.

use std::fmt;

use serde_json::json;
use validator::{Validate, ValidationErrors};

use crate::auth::credentials::{CredentialPair, IssuedTokens};
use crate::auth::error::SignInError;
use crate::auth::SessionStore;
use crate::clients::{ClientError, GraphqlClient, GraphqlOperation};
use crate::routes::Route;

/// The login operation document.
pub const LOGIN_QUERY: &str = r"
    query userLogin($payload: UserLoginDto!) {
      userLogin(payload: $payload) {
        accessToken
        refreshToken
      }
    }
";

const LOGIN_FIELD: &str = "userLogin";

/// Rule code of the `length(min = 1)` check used for required fields.
const REQUIRED_RULE: &str = "length";

/// The sign-in form values.
///
/// Validation runs through [`Validate::validate`]: both fields are required
/// and the email must be well-formed. Use [`field_message`] to get the
/// message for one field.
///
/// The [`Debug`] implementation masks the password.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct SignInForm {
    /// The email address as typed.
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,
    /// The password as typed.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl SignInForm {
    /// Creates a form from the typed values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn login_operation(&self) -> GraphqlOperation {
        GraphqlOperation::new(LOGIN_QUERY).with_variables(json!({
            "payload": { "email": self.email, "password": self.password }
        }))
    }
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .field("password", &"*****")
            .finish()
    }
}

/// Returns the message to show next to `field`, if it failed validation.
///
/// A missing value takes precedence over a malformed one, so an empty email
/// reports "Email is required".
#[must_use]
pub fn field_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    let field_errors = errors.field_errors();
    let failures = field_errors.get(field)?;
    let failure = failures
        .iter()
        .find(|e| e.code == REQUIRED_RULE)
        .or_else(|| failures.first())?;
    failure.message.as_ref().map(ToString::to_string)
}

/// Signs in with `form` and stores the issued credentials.
///
/// Returns the route to navigate to, which is always
/// [`Route::Dashboard`] on success.
///
/// # Errors
///
/// - [`SignInError::Invalid`] if the form fails validation (nothing is sent)
/// - [`SignInError::InvalidCredentials`] if the server rejects the login or
///   returns no tokens
/// - [`SignInError::Client`] for transport and decoding failures
pub async fn sign_in(client: &GraphqlClient, form: &SignInForm) -> Result<Route, SignInError> {
    form.validate()?;

    let response = match client
        .execute_unauthenticated(&form.login_operation())
        .await
    {
        Ok(response) => response,
        Err(ClientError::ServerRejected { message, .. }) => {
            tracing::debug!("Login rejected: {}", message);
            return Err(SignInError::InvalidCredentials);
        }
        Err(ClientError::Unauthenticated) => return Err(SignInError::InvalidCredentials),
        Err(e) => return Err(e.into()),
    };

    let issued: Option<IssuedTokens> = response
        .field(LOGIN_FIELD)
        .map_err(|e| SignInError::Client(e.into()))?;
    let issued = issued.unwrap_or_default();

    let pair = CredentialPair::from_parts(issued.access_token, issued.refresh_token)
        .ok_or(SignInError::InvalidCredentials)?;

    client.session_store().set(&pair);
    tracing::debug!("Signed in, credentials stored");

    Ok(Route::Dashboard)
}

/// Signs out by clearing the stored credentials.
///
/// Returns the route to navigate to, [`Route::SignIn`].
pub fn sign_out(store: &dyn SessionStore) -> Route {
    store.clear();
    tracing::debug!("Signed out, credentials cleared");
    Route::SignIn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;

    #[test]
    fn test_valid_form_passes() {
        assert!(SignInForm::new("a@b.com", "x").validate().is_ok());
    }

    #[test]
    fn test_empty_fields_are_required() {
        let errors = SignInForm::new("", "").validate().unwrap_err();

        assert_eq!(field_message(&errors, "email").as_deref(), Some("Email is required"));
        assert_eq!(
            field_message(&errors, "password").as_deref(),
            Some("Password is required")
        );
    }

    #[test]
    fn test_malformed_emails_are_rejected() {
        for email in [
            "plainaddress",
            "@b.com",
            "a@",
            "a@b..com",
            "a b@c.com",
            "a@b@c.com",
            "a@-b.com",
        ] {
            let errors = SignInForm::new(email, "x").validate().unwrap_err();
            assert_eq!(
                field_message(&errors, "email").as_deref(),
                Some("Please enter a valid email"),
                "{email} should be rejected"
            );
            assert_eq!(field_message(&errors, "password"), None);
        }
    }

    #[test]
    fn test_well_formed_emails_are_accepted() {
        for email in ["a@b.com", "first.last+tag@mail.example.org", "x@sub-domain.io"] {
            assert!(
                SignInForm::new(email, "x").validate().is_ok(),
                "{email} should be accepted"
            );
        }
    }

    #[test]
    fn test_validation_failure_becomes_sign_in_error() {
        let errors = SignInForm::new("a@b.com", "").validate().unwrap_err();
        let error = SignInError::from(errors);

        assert!(matches!(error, SignInError::Invalid(_)));
        assert_eq!(error.user_message(), "Please correct the highlighted fields.");
    }

    #[test]
    fn test_login_operation_variables() {
        let op = SignInForm::new("a@b.com", "x").login_operation();

        assert_eq!(op.operation_name(), Some("userLogin"));
        assert_eq!(op.variables["payload"]["email"], "a@b.com");
        assert_eq!(op.variables["payload"]["password"], "x");
    }

    #[test]
    fn test_debug_masks_password() {
        let debug = format!("{:?}", SignInForm::new("a@b.com", "hunter2"));
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_sign_out_clears_store() {
        let store = MemorySessionStore::with_credentials(CredentialPair::new("T1", "R1"));

        let route = sign_out(&store);

        assert_eq!(route, Route::SignIn);
        assert!(store.get().is_none());
    }
}
