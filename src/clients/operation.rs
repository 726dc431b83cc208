//! GraphQL operations sent to the endpoint.

use serde::Serialize;
use serde_json::Value;

/// A single GraphQL request: the document and its variables.
///
/// An operation is owned by the call that sends it and is reused verbatim
/// when the client retries after a token refresh.
///
/// # Example
///
/// ```rust
/// use vineo_client::GraphqlOperation;
/// use serde_json::json;
///
/// let op = GraphqlOperation::new("query BoxHistory($payload: BoxHistoryDto!) { getBoxHistory(payload: $payload) { box_count } }")
///     .with_variables(json!({ "payload": { "page": 1, "limit": 4 } }));
///
/// assert_eq!(op.operation_name(), Some("BoxHistory"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlOperation {
    /// The GraphQL document.
    pub query: String,
    /// Variables for the document; an empty object when there are none.
    pub variables: Value,
}

impl GraphqlOperation {
    /// Creates an operation without variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Value::Object(serde_json::Map::new()),
        }
    }

    /// Sets the variables.
    #[must_use]
    pub fn with_variables(mut self, variables: impl Into<Value>) -> Self {
        self.variables = variables.into();
        self
    }

    /// Returns the operation name declared in the document, if any.
    ///
    /// Used for log lines only.
    #[must_use]
    pub fn operation_name(&self) -> Option<&str> {
        let head = self.query.split(['{', '(']).next()?;
        let mut words = head.split_whitespace();

        match words.next()? {
            "query" | "mutation" | "subscription" => words.next(),
            _ => None,
        }
    }

    pub(crate) fn label(&self) -> &str {
        self.operation_name().unwrap_or("anonymous")
    }
}
