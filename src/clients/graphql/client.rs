//! GraphQL client with bearer authentication and one-shot token refresh.
//!
//! Every call to [`GraphqlClient::execute`] runs a small state machine:
//!
//! ```text
//! Sending ──success──────────────────────────────► Ok
//!    │ ──other failure───────────────────────────► Err (no retry)
//!    └─401─► Refreshing ──ok──► Retrying ──success─► Ok
//!                │                  └──any failure─► Unauthenticated
//!                └──failed──────────────────────────► Unauthenticated
//! ```
//!
//! `Unauthenticated` clears the session store before returning
//! [`ClientError::Unauthenticated`]. The retry state can only be entered
//! from `Refreshing`, so an operation is refreshed and retried at most once.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::auth::refresh::refresh_credentials;
use crate::auth::{CredentialPair, RefreshError, SessionStore};
use crate::clients::graphql::response::{GraphqlResponse, Reply};
use crate::clients::graphql::ClientError;
use crate::clients::{GraphqlOperation, HttpClient};
use crate::config::VineoConfig;

/// Where a single `execute` call currently is.
#[derive(Debug)]
enum RequestState {
    /// First send, with whatever credentials the store held.
    Sending { credentials: Option<CredentialPair> },
    /// The first send hit the 401 signal with these credentials.
    Refreshing { rejected: Option<CredentialPair> },
    /// Second and last send, with freshly issued credentials.
    Retrying { credentials: CredentialPair },
    /// Recovery failed; the store is cleared on this transition.
    Unauthenticated,
}

/// GraphQL client for the Vineo endpoint.
///
/// The client reads the credential pair from its [`SessionStore`] for every
/// operation, attaches the access token as a bearer token and recovers once
/// from an authorization failure by refreshing the pair.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`; share it behind an `Arc` or by
/// reference between concurrent tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use vineo_client::{GraphqlClient, GraphqlOperation, MemorySessionStore, VineoConfig};
///
/// let client = GraphqlClient::new(&VineoConfig::default(), Arc::new(MemorySessionStore::new()));
///
/// let response = client
///     .execute(&GraphqlOperation::new("mutation getSubscriptionStatus { getSubscriptionStatus { status } }"))
///     .await?;
/// println!("{}", response.data);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// Transport to the endpoint.
    http_client: HttpClient,
    /// Source and sink of the credential pair.
    store: Arc<dyn SessionStore>,
    /// Held while refreshing when refresh sharing is enabled.
    refresh_slot: Option<Mutex<()>>,
    /// The configuration this client was built from.
    config: VineoConfig,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a client for the configured endpoint backed by `store`.
    #[must_use]
    pub fn new(config: &VineoConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http_client: HttpClient::new(config),
            store,
            refresh_slot: config.share_refresh().then(|| Mutex::new(())),
            config: config.clone(),
        }
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub const fn config(&self) -> &VineoConfig {
        &self.config
    }

    /// Returns the session store used by this client.
    #[must_use]
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Executes `operation` with the stored credentials.
    ///
    /// Without stored credentials the request is sent without an
    /// `Authorization` header and the server decides whether the operation
    /// needs one.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthenticated`] when the 401 signal could not be
    ///   recovered from; the session store is cleared
    /// - [`ClientError::Transport`], [`ClientError::Decode`] or
    ///   [`ClientError::ServerRejected`] for failures of the first send
    pub async fn execute(
        &self,
        operation: &GraphqlOperation,
    ) -> Result<GraphqlResponse, ClientError> {
        let mut state = RequestState::Sending {
            credentials: self.store.get().filter(CredentialPair::is_complete),
        };

        loop {
            state = match state {
                RequestState::Sending { credentials } => {
                    match self.send(operation, credentials.as_ref()).await {
                        Reply::Success(response) => return Ok(response),
                        Reply::Failed(e) => return Err(e),
                        Reply::AuthFailed => {
                            tracing::debug!(
                                "GraphQL {} was unauthorized, refreshing credentials",
                                operation.label()
                            );
                            RequestState::Refreshing {
                                rejected: credentials,
                            }
                        }
                    }
                }
                RequestState::Refreshing { rejected } => {
                    match self.renew_credentials(rejected).await {
                        Ok(credentials) => RequestState::Retrying { credentials },
                        Err(e) => {
                            tracing::warn!(
                                "Credential refresh for GraphQL {} failed: {}",
                                operation.label(),
                                e
                            );
                            RequestState::Unauthenticated
                        }
                    }
                }
                RequestState::Retrying { credentials } => {
                    match self.send(operation, Some(&credentials)).await {
                        Reply::Success(response) => return Ok(response),
                        Reply::AuthFailed => {
                            tracing::warn!(
                                "GraphQL {} was unauthorized again after refresh",
                                operation.label()
                            );
                            RequestState::Unauthenticated
                        }
                        Reply::Failed(e) => {
                            tracing::warn!(
                                "Retry of GraphQL {} failed: {}",
                                operation.label(),
                                e
                            );
                            RequestState::Unauthenticated
                        }
                    }
                }
                RequestState::Unauthenticated => {
                    tracing::warn!("Clearing stored credentials");
                    self.store.clear();
                    return Err(ClientError::Unauthenticated);
                }
            };
        }
    }

    /// Executes `operation` and deserializes `data.<field>` into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`ClientError::Decode`] if the field does not match `T`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        operation: &GraphqlOperation,
        field: &str,
    ) -> Result<T, ClientError> {
        let response = self.execute(operation).await?;
        Ok(response.field(field)?)
    }

    /// Executes `operation` without credentials and without the refresh path.
    ///
    /// Used for operations that must work while signed out, such as login.
    /// The session store is neither read nor written.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthenticated`] if the server answers with the 401
    /// signal; otherwise as for [`execute`](Self::execute).
    pub async fn execute_unauthenticated(
        &self,
        operation: &GraphqlOperation,
    ) -> Result<GraphqlResponse, ClientError> {
        match self.send(operation, None).await {
            Reply::Success(response) => Ok(response),
            Reply::AuthFailed => Err(ClientError::Unauthenticated),
            Reply::Failed(e) => Err(e),
        }
    }

    async fn send(
        &self,
        operation: &GraphqlOperation,
        credentials: Option<&CredentialPair>,
    ) -> Reply {
        match self.http_client.post(operation, credentials).await {
            Ok(response) => Reply::classify(response),
            Err(e) => Reply::Failed(e.into()),
        }
    }

    /// Produces credentials to retry with after `rejected` got the 401 signal.
    ///
    /// With refresh sharing, callers queue on the refresh slot; whoever gets
    /// the slot after a successful refresh finds a different access token in
    /// the store and reuses it instead of refreshing again.
    async fn renew_credentials(
        &self,
        rejected: Option<CredentialPair>,
    ) -> Result<CredentialPair, RefreshError> {
        let rejected = rejected.ok_or(RefreshError::MissingCredentials)?;

        let Some(slot) = &self.refresh_slot else {
            return self.refresh_and_store(&rejected).await;
        };

        let _guard = slot.lock().await;
        if let Some(current) = self.store.get() {
            if current.access_token() != rejected.access_token() {
                tracing::debug!("Reusing credentials refreshed by a concurrent request");
                return Ok(current);
            }
        }
        self.refresh_and_store(&rejected).await
    }

    async fn refresh_and_store(
        &self,
        rejected: &CredentialPair,
    ) -> Result<CredentialPair, RefreshError> {
        let pair = refresh_credentials(&self.http_client, Some(rejected)).await?;
        self.store.set(&pair);
        tracing::debug!("Stored refreshed credentials");
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;

    #[test]
    fn test_share_refresh_controls_refresh_slot() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

        let shared = GraphqlClient::new(&VineoConfig::default(), Arc::clone(&store));
        assert!(shared.refresh_slot.is_some());

        let config = VineoConfig::builder().share_refresh(false).build().unwrap();
        let independent = GraphqlClient::new(&config, store);
        assert!(independent.refresh_slot.is_none());
    }

    #[test]
    fn test_client_exposes_its_store() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_credentials(
            CredentialPair::new("T1", "R1"),
        ));
        let client = GraphqlClient::new(&VineoConfig::default(), Arc::clone(&store));

        assert!(client.session_store().is_authenticated());
        assert_eq!(client.config().page_size(), 4);
    }

    #[test]
    fn test_graphql_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphqlClient>();
    }
}
