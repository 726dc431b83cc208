//! HTTP transport for the GraphQL endpoint.
//!
//! [`HttpClient`] knows how to POST a GraphQL operation to the configured
//! endpoint with or without a bearer token. It does not look at the body;
//! authorization handling lives in [`GraphqlClient`](crate::GraphqlClient).

use std::collections::HashMap;

use crate::auth::CredentialPair;
use crate::clients::errors::HttpError;
use crate::clients::http_response::HttpResponse;
use crate::clients::operation::GraphqlOperation;
use crate::config::VineoConfig;

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the Vineo GraphQL endpoint.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The full endpoint URL.
    endpoint: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &VineoConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Vineo Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint().as_ref().to_string(),
            default_headers,
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// POSTs `operation` to the endpoint.
    ///
    /// When `credentials` is `Some`, an `Authorization: Bearer <access>`
    /// header is added; otherwise the request carries no `Authorization`
    /// header at all.
    ///
    /// Any status code is returned as a response; only failures to obtain a
    /// response at all are errors.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the operation cannot be serialized,
    /// the request cannot be sent or the body cannot be read.
    pub async fn post(
        &self,
        operation: &GraphqlOperation,
        credentials: Option<&CredentialPair>,
    ) -> Result<HttpResponse, HttpError> {
        let mut req_builder = self.client.post(&self.endpoint);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(pair) = credentials {
            req_builder = req_builder.header(reqwest::header::AUTHORIZATION, pair.bearer());
        }

        let res = req_builder.json(operation).send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!(
            "GraphQL {} answered with status {}",
            operation.label(),
            code
        );

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphqlEndpoint;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let config = VineoConfig::builder()
            .endpoint(GraphqlEndpoint::new("http://localhost:4000/graphql").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config);

        assert_eq!(client.endpoint(), "http://localhost:4000/graphql");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&VineoConfig::default());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Vineo Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = VineoConfig::builder()
            .user_agent_prefix("VineoWeb/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("VineoWeb/1.0 | "));
    }

    #[test]
    fn test_json_headers_are_default() {
        let client = HttpClient::new(&VineoConfig::default());

        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_no_authorization_in_default_headers() {
        let client = HttpClient::new(&VineoConfig::default());
        assert!(client.default_headers().get("Authorization").is_none());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
