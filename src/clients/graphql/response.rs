//! GraphQL response bodies and the authorization-failure signal.
//!
//! The Vineo backend reports an expired or invalid access token inside a
//! normal GraphQL error entry rather than through the HTTP status:
//!
//! ```json
//! { "errors": [ { "message": "Unauthorized",
//!                 "extensions": { "response": { "statusCode": 401 } } } ] }
//! ```
//!
//! [`GraphqlErrorEntry::is_unauthorized`] looks for exactly that nested path.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::graphql::ClientError;
use crate::clients::http_response::HttpResponse;

/// Status code carried by the authorization-failure signal.
pub const UNAUTHORIZED_STATUS: u64 = 401;

/// One entry of a GraphQL `errors` array.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphqlErrorEntry {
    /// Human-readable error message.
    #[serde(default)]
    pub message: String,
    /// Path of the field that failed, if reported.
    #[serde(default)]
    pub path: Option<Value>,
    /// Server-specific extension data.
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphqlErrorEntry {
    /// Returns `extensions.response.statusCode`, if present and numeric.
    #[must_use]
    pub fn status_code(&self) -> Option<u64> {
        self.extensions
            .as_ref()?
            .pointer("/response/statusCode")?
            .as_u64()
    }

    /// Returns `true` if this entry is the 401 authorization-failure signal.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(UNAUTHORIZED_STATUS)
    }
}

/// A parsed GraphQL response body.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphqlResponse {
    /// The `data` object; `Null` when absent.
    #[serde(default)]
    pub data: Value,
    /// The `errors` array, if any.
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorEntry>>,
    /// The `extensions` object, if any.
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphqlResponse {
    /// Returns the error entries, empty when the response has none.
    #[must_use]
    pub fn errors(&self) -> &[GraphqlErrorEntry] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Returns `true` if any error entry carries the 401 signal.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.errors().iter().any(GraphqlErrorEntry::is_unauthorized)
    }

    /// Deserializes `data.<name>` into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the field is missing or does not
    /// match `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vineo_client::GraphqlResponse;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Status { status: String }
    ///
    /// let response: GraphqlResponse = serde_json::from_str(
    ///     r#"{"data":{"getSubscriptionStatus":{"status":"active"}}}"#,
    /// ).unwrap();
    /// let status: Status = response.field("getSubscriptionStatus").unwrap();
    /// assert_eq!(status.status, "active");
    /// ```
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T, serde_json::Error> {
        let value = self.data.get(name).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value)
    }
}

/// How a single send of an operation ended.
#[derive(Debug)]
pub(crate) enum Reply {
    /// A well-formed response without errors.
    Success(GraphqlResponse),
    /// The 401 signal was present.
    AuthFailed,
    /// Any other failure; never retried.
    Failed(ClientError),
}

impl Reply {
    /// Classifies a raw HTTP response.
    pub(crate) fn classify(response: HttpResponse) -> Self {
        let parsed = serde_json::from_str::<GraphqlResponse>(&response.body);

        match parsed {
            Ok(body) if body.is_unauthorized() => Self::AuthFailed,
            Ok(body) if !body.errors().is_empty() => {
                let errors = body.errors.unwrap_or_default();
                let message = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ");
                Self::Failed(ClientError::ServerRejected { message, errors })
            }
            Ok(_) | Err(_) if !response.is_ok() => {
                Self::Failed(ClientError::Transport(Self::status_error(&response)))
            }
            Ok(body) => Self::Success(body),
            Err(e) => Self::Failed(ClientError::Decode(e)),
        }
    }

    fn status_error(response: &HttpResponse) -> HttpError {
        let message = if response.body.trim().is_empty() {
            reqwest::StatusCode::from_u16(response.code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            response.body.clone()
        };

        HttpError::Response(HttpResponseError {
            code: response.code,
            message,
            error_reference: response.request_id().map(String::from),
        })
    }
}
