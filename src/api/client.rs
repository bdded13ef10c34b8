// Storefront Core - Bookstore catalog, inquiry and quiz client
// Copyright (C) 2025 Storefront Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP client for the bookstore API
//!
//! `StorefrontClient` is the single point of HTTP access. It:
//! - Reads the bearer token from session storage on every request
//! - Normalizes every JSON response with [`deep_camelize`]
//! - Turns non-2xx responses into [`StorefrontError::ApiRequestFailed`]
//! - Returns non-JSON bodies as a JSON string value
//!
//! There is deliberately no retry, no token refresh and no caching: a failed
//! request surfaces once, and a 401 means the caller must log in again.
//!
//! Resource-specific endpoints live in sibling modules as `impl StorefrontClient`
//! blocks (`books.rs`, `quizzes.rs`, ...).

use crate::api::normalize::deep_camelize;
use crate::error::{Result, StorefrontError};
use crate::storage::SessionStore;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Backend base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5035/api";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for StorefrontClient
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL including the `/api` prefix
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("storefront-core/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Main HTTP client for the bookstore API
///
/// # Example
/// ```rust,no_run
/// use storefront_core::api::StorefrontClient;
/// use storefront_core::storage::SessionStore;
///
/// # async fn example() -> storefront_core::error::Result<()> {
/// let session = SessionStore::in_memory().await?;
/// let client = StorefrontClient::new(session)?;
///
/// let stats: serde_json::Value = client.get("/Dashboard/stats").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    /// API base URL without trailing slash (e.g. http://localhost:5035/api)
    base_url: String,
    config: ClientConfig,
    session: SessionStore,
}

impl StorefrontClient {
    /// Create a client with default configuration
    pub fn new(session: SessionStore) -> Result<Self> {
        Self::with_config(session, ClientConfig::default())
    }

    /// Create a client with custom configuration
    ///
    /// # Errors
    /// Returns error if the base URL does not parse or the HTTP client cannot be built
    pub fn with_config(session: SessionStore, config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| StorefrontError::invalid_input(format!("Invalid user agent: {}", e)))?,
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
            session,
        })
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session storage this client reads its token from
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Server origin without the API path, used to resolve relative image paths
    ///
    /// `http://localhost:5035/api` becomes `http://localhost:5035/`.
    pub fn api_origin(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_path("/");
        url.set_query(None);
        Ok(url)
    }

    /// Generic API call returning normalized JSON
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `endpoint` - Path relative to the base URL (e.g. `/Books/featured`)
    /// * `body` - Optional JSON body
    pub async fn api_call(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        let mut builder = self.client.request(method, &url);
        if let Some(b) = body {
            builder = builder.json(b);
        }
        self.send(endpoint, builder, true).await
    }

    /// Perform a GET request
    pub async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.api_call(Method::GET, endpoint, None).await?;
        from_value(value)
    }

    /// Perform a GET request with query parameters
    ///
    /// # Arguments
    /// * `endpoint` - API endpoint path
    /// * `query` - Anything reqwest can serialize as a query string,
    ///   typically a slice of key/value pairs
    pub async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint);
        let builder = self.client.get(&url).query(query);
        let value = self.send(endpoint, builder, true).await?;
        from_value(value)
    }

    /// Perform a POST request with JSON body
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(Method::POST, endpoint, body).await
    }

    /// Perform a PUT request with JSON body
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(Method::PUT, endpoint, body).await
    }

    /// Perform a PATCH request with JSON body
    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(Method::PATCH, endpoint, body).await
    }

    /// Perform a DELETE request
    ///
    /// Returns the normalized body, which is usually an empty string for 204 responses.
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.api_call(Method::DELETE, endpoint, None).await
    }

    /// POST a multipart form (file uploads)
    ///
    /// Only the Authorization header is attached; reqwest sets the multipart
    /// Content-Type with its boundary.
    pub async fn post_multipart<T>(&self, endpoint: &str, form: Form) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        let builder = self.client.post(&url).multipart(form);
        let value = self.send(endpoint, builder, false).await?;
        from_value(value)
    }

    async fn request_json<T, B>(&self, method: Method, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint);
        let builder = self.client.request(method, &url).json(body);
        let value = self.send(endpoint, builder, true).await?;
        from_value(value)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Attach headers, send, and classify the outcome
    async fn send(&self, endpoint: &str, builder: RequestBuilder, json_content: bool) -> Result<Value> {
        let headers = self.build_auth_headers(json_content).await?;
        let request = builder.headers(headers).build()?;
        let method = request.method().clone();

        tracing::debug!(%method, endpoint, "API call");

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::debug!(%method, endpoint, error = %e, "API call failed before response");
            StorefrontError::network_error(format!("Network request failed: {}", e), e.is_timeout())
        })?;

        let status = response.status();
        tracing::debug!(%method, endpoint, status = status.as_u16(), "API response");

        if status.is_success() {
            self.handle_success_response(endpoint, response).await
        } else {
            Err(self.handle_error_response(endpoint, response).await)
        }
    }

    /// Build request headers from the stored session
    ///
    /// The token is read fresh on every call; nothing is cached on the client.
    async fn build_auth_headers(&self, json_content: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if json_content {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        if let Some(token) = self.session.token().await? {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| StorefrontError::StorageError(format!("Invalid stored token: {}", e)))?,
            );
        }

        Ok(headers)
    }

    /// JSON bodies are parsed and normalized, anything else comes back as a string
    async fn handle_success_response(&self, endpoint: &str, response: Response) -> Result<Value> {
        let is_json = is_json_response(&response);

        let response_text = response.text().await.map_err(|e| {
            StorefrontError::network_error(format!("Failed to read response body: {}", e), e.is_timeout())
        })?;

        if !is_json {
            return Ok(Value::String(response_text));
        }

        match serde_json::from_str::<Value>(&response_text) {
            Ok(raw) => Ok(deep_camelize(raw)),
            Err(e) => Err(StorefrontError::InvalidApiResponse {
                message: format!("{} returned malformed JSON: {}", endpoint, e),
                response_body: Some(response_text),
            }),
        }
    }

    /// Non-2xx: prefer the JSON body's `message`, else the raw text
    async fn handle_error_response(&self, endpoint: &str, response: Response) -> StorefrontError {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<Value>(&error_text).ok().map(deep_camelize);

        let from_body = body.as_ref().and_then(error_message_from_body);

        let message = match from_body {
            Some(m) => m,
            None if !error_text.trim().is_empty() => error_text,
            None => format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        };

        StorefrontError::api_failed(message, status.as_u16(), endpoint, body)
    }
}

fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json") || ct.contains("+json"))
        .unwrap_or(false)
}

/// First string among the body's `message` and `title` fields
fn error_message_from_body(body: &Value) -> Option<String> {
    ["message", "title"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Deserialize a normalized JSON value into a typed model
///
/// Shape mismatches are reported as `InvalidApiResponse`, not as serde errors,
/// since they mean the backend answered with something unexpected.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value::<T>(value.clone()).map_err(|e| StorefrontError::InvalidApiResponse {
        message: format!("Unexpected response shape: {}", e),
        response_body: Some(value.to_string()),
    })
}

// ===== TESTS =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_skips_non_string_message() {
        let body = serde_json::json!({"message": {"code": 7}, "title": "Validation failed"});
        assert_eq!(error_message_from_body(&body).as_deref(), Some("Validation failed"));

        let body = serde_json::json!({"message": "Book not found", "title": "Not Found"});
        assert_eq!(error_message_from_body(&body).as_deref(), Some("Book not found"));

        assert_eq!(error_message_from_body(&serde_json::json!({"message": null})), None);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder()
            .base_url("https://books.example.com/api/")
            .timeout(Duration::from_secs(5))
            .user_agent("TestAgent/1.0")
            .build();

        assert_eq!(config.base_url, "https://books.example.com/api/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "TestAgent/1.0");
    }

    #[tokio::test]
    async fn test_trailing_slash_trimmed() {
        let session = SessionStore::in_memory().await.unwrap();
        let config = ClientConfig::builder().base_url("http://localhost:5035/api/").build();
        let client = StorefrontClient::with_config(session, config).unwrap();

        assert_eq!(client.base_url(), "http://localhost:5035/api");
        assert_eq!(client.endpoint_url("/Books"), "http://localhost:5035/api/Books");
    }

    #[tokio::test]
    async fn test_invalid_base_url_rejected() {
        let session = SessionStore::in_memory().await.unwrap();
        let config = ClientConfig::builder().base_url("not a url").build();

        let result = StorefrontClient::with_config(session, config);
        assert!(matches!(result, Err(StorefrontError::UrlError(_))));
    }

    #[tokio::test]
    async fn test_api_origin_strips_path() {
        let session = SessionStore::in_memory().await.unwrap();
        let client = StorefrontClient::new(session).unwrap();

        assert_eq!(client.api_origin().unwrap().as_str(), "http://localhost:5035/");
    }

    #[tokio::test]
    async fn test_auth_header_only_with_token() {
        let session = SessionStore::in_memory().await.unwrap();
        let client = StorefrontClient::new(session.clone()).unwrap();

        let headers = client.build_auth_headers(true).await.unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");

        session.set_item(crate::storage::TOKEN_KEY, "abc").await.unwrap();
        let headers = client.build_auth_headers(false).await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_from_value_shape_mismatch() {
        let result: Result<Vec<u32>> = from_value(serde_json::json!({"items": []}));
        assert!(matches!(result, Err(StorefrontError::InvalidApiResponse { .. })));
    }
}
