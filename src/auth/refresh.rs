//! Renewal of the credential pair through the `getAccessToken` operation.
//!
//! The refresh call carries both the rejected access token and the refresh
//! token as variables and is sent without an `Authorization` header. The
//! server may or may not rotate the refresh token; when the response omits
//! it, the current refresh token stays in use.

use serde_json::json;

use crate::auth::credentials::{CredentialPair, IssuedTokens};
use crate::auth::error::RefreshError;
use crate::clients::graphql::Reply;
use crate::clients::{GraphqlOperation, HttpClient};

/// The refresh operation document.
pub const REFRESH_QUERY: &str = r"
    query getAccessToken($accessToken: String!, $refreshToken: String!) {
      getAccessToken(accessToken: $accessToken, refreshToken: $refreshToken) {
        accessToken
        refreshToken
      }
    }
";

/// Name of the refresh field in the response `data`.
const REFRESH_FIELD: &str = "getAccessToken";

/// Builds the refresh operation for `current`.
pub(crate) fn refresh_operation(current: &CredentialPair) -> GraphqlOperation {
    GraphqlOperation::new(REFRESH_QUERY).with_variables(json!({
        "accessToken": current.access_token(),
        "refreshToken": current.refresh_token(),
    }))
}

/// Exchanges `current` for a new credential pair.
///
/// `current` is `None` when the store did not hold a complete pair; in that
/// case no request is sent.
///
/// # Errors
///
/// Returns a [`RefreshError`] when there is nothing to refresh, the request
/// fails, the server rejects it, or the response carries no access token.
pub(crate) async fn refresh_credentials(
    http_client: &HttpClient,
    current: Option<&CredentialPair>,
) -> Result<CredentialPair, RefreshError> {
    let current = current
        .filter(|pair| pair.is_complete())
        .ok_or(RefreshError::MissingCredentials)?;

    let response = match http_client.post(&refresh_operation(current), None).await {
        Ok(response) => response,
        Err(e) => return Err(RefreshError::Request(e.into())),
    };

    let body = match Reply::classify(response) {
        Reply::Success(body) => body,
        Reply::AuthFailed => return Err(RefreshError::Rejected),
        Reply::Failed(e) => return Err(RefreshError::Request(e)),
    };

    let issued: Option<IssuedTokens> = body
        .field(REFRESH_FIELD)
        .map_err(|e| RefreshError::Request(e.into()))?;
    let issued = issued.unwrap_or_default();

    let access_token = issued
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(RefreshError::MissingAccessToken)?;
    let refresh_token = issued
        .refresh_token
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| current.refresh_token().to_string());

    Ok(CredentialPair::new(access_token, refresh_token))
}
