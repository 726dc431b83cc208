//! Subscription status of the signed-in user.

use serde::{Deserialize, Serialize};

use crate::clients::{ClientError, GraphqlClient, GraphqlOperation};

/// The subscription status operation document.
///
/// The server exposes this as a mutation even though it only reads.
pub const SUBSCRIPTION_STATUS_QUERY: &str = r"
    mutation getSubscriptionStatus {
      getSubscriptionStatus {
        status
      }
    }
";

const SUBSCRIPTION_STATUS_FIELD: &str = "getSubscriptionStatus";

/// Subscription status as reported by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    /// Opaque status value, shown as received.
    pub status: String,
}

/// Fetches the subscription status of the signed-in user.
///
/// # Errors
///
/// Returns [`ClientError`] if the call fails or the status cannot be decoded.
pub async fn fetch_subscription_status(
    client: &GraphqlClient,
) -> Result<SubscriptionStatus, ClientError> {
    client
        .execute_as(
            &GraphqlOperation::new(SUBSCRIPTION_STATUS_QUERY),
            SUBSCRIPTION_STATUS_FIELD,
        )
        .await
}
