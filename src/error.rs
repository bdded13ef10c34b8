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


//! Error types for the storefront client
//!
//! Every request failure collapses into one of three transport-level categories:
//!
//! - `NetworkError` - the request never produced a response (DNS, connect, timeout)
//! - `ApiRequestFailed` - the backend answered with a non-2xx status
//! - `InvalidApiResponse` - the backend claimed JSON but the body did not parse
//!
//! The remaining variants cover local concerns: form validation, configuration,
//! session storage and I/O.
//!
//! Callers catch errors at the action boundary (a CLI command, a button handler)
//! and show `user_message()`. Nothing here is retried.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias using our StorefrontError type
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Main error type for the storefront client
#[derive(Error, Debug)]
pub enum StorefrontError {
    // ===== API Errors =====

    /// Non-2xx HTTP response
    #[error("API request failed ({status_code}): {message}")]
    ApiRequestFailed {
        /// Message from the JSON body's `message` field, else the raw body text
        message: String,
        status_code: u16,
        /// Endpoint path relative to the API base (e.g. `/Books/12`)
        endpoint: String,
        /// Normalized JSON body, when the error body was JSON
        body: Option<Value>,
    },

    /// Body announced as JSON could not be parsed, or did not match the expected shape
    #[error("Invalid API response: {message}")]
    InvalidApiResponse {
        message: String,
        /// Raw response body for debugging
        response_body: Option<String>,
    },

    /// Transport failure before any HTTP response was received
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        /// Whether the request timed out
        is_timeout: bool,
    },

    // ===== Input Errors =====

    /// Client-side form validation failed (field name -> message)
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),

    /// Generic input validation error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== Configuration/State Errors =====

    /// Configuration file or value is invalid
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Local session storage is corrupt or unusable
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    // ===== External Library Errors =====

    /// HTTP client error from reqwest (request building, body reading)
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Database driver error from sqlx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for StorefrontError {
    fn from(err: toml::de::Error) -> Self {
        StorefrontError::ConfigurationError(err.to_string())
    }
}

impl From<toml::ser::Error> for StorefrontError {
    fn from(err: toml::ser::Error) -> Self {
        StorefrontError::ConfigurationError(err.to_string())
    }
}

// Helper methods for creating common errors
impl StorefrontError {
    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        StorefrontError::InvalidInput(message.into())
    }

    /// Create an ApiRequestFailed error
    pub fn api_failed<S: Into<String>>(
        message: S,
        status_code: u16,
        endpoint: impl Into<String>,
        body: Option<Value>,
    ) -> Self {
        StorefrontError::ApiRequestFailed {
            message: message.into(),
            status_code,
            endpoint: endpoint.into(),
            body,
        }
    }

    /// Create a NetworkError from a transport failure
    pub fn network_error<S: Into<String>>(message: S, is_timeout: bool) -> Self {
        StorefrontError::NetworkError {
            message: message.into(),
            is_timeout,
        }
    }

    /// HTTP status code, for errors that carry one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StorefrontError::ApiRequestFailed { status_code, .. } => Some(*status_code),
            StorefrontError::ReqwestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if error means the caller must (re-)authenticate
    ///
    /// 401s are never refreshed automatically.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }

    /// Per-field validation messages
    ///
    /// Returns the local validation map, or for a server 400 with an ASP.NET style
    /// `errors` object (`{"errors": {"Email": ["taken", ...]}}`), the first message
    /// of each field.
    pub fn validation_errors(&self) -> Option<BTreeMap<String, String>> {
        match self {
            StorefrontError::Validation(errors) => Some(errors.clone()),
            StorefrontError::ApiRequestFailed {
                body: Some(body), ..
            } => {
                let errors = body.get("errors")?.as_object()?;
                let map: BTreeMap<String, String> = errors
                    .iter()
                    .filter_map(|(field, messages)| {
                        let first = match messages {
                            Value::Array(items) => items.first()?.as_str()?.to_string(),
                            Value::String(s) => s.clone(),
                            _ => return None,
                        };
                        Some((field.clone(), first))
                    })
                    .collect();
                if map.is_empty() {
                    None
                } else {
                    Some(map)
                }
            }
            _ => None,
        }
    }

    /// Get user-facing message suitable for a toast or CLI error line
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::NetworkError { .. } => {
                "حدث خطأ في الاتصال بالخادم".to_string()
            }
            StorefrontError::ApiRequestFailed { status_code: 401, .. } => {
                "انتهت الجلسة. يرجى تسجيل الدخول مرة أخرى".to_string()
            }
            StorefrontError::ApiRequestFailed { message, .. } if !message.is_empty() => {
                message.clone()
            }
            StorefrontError::Validation(errors) => errors
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_error_classification() {
        let unauthorized = StorefrontError::api_failed("Unauthorized", 401, "/Dashboard/stats", None);
        assert!(unauthorized.is_auth_error());

        let missing = StorefrontError::api_failed("Book not found", 404, "/Books/9", None);
        assert!(!missing.is_auth_error());
        assert_eq!(missing.status_code(), Some(404));

    }

    #[test]
    fn test_validation_errors_from_server_body() {
        let body = json!({
            "title": "One or more validation errors occurred.",
            "errors": {
                "Email": ["Email is already registered", "second"],
                "Username": "Taken"
            }
        });
        let err = StorefrontError::api_failed("bad request", 400, "/Auth/register-customer", Some(body));

        let errors = err.validation_errors().unwrap();
        assert_eq!(errors["Email"], "Email is already registered");
        assert_eq!(errors["Username"], "Taken");
    }

    #[test]
    fn test_validation_errors_absent_without_errors_key() {
        let err = StorefrontError::api_failed("oops", 500, "/Books", Some(json!({"message": "oops"})));
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = StorefrontError::api_failed("الكتاب غير موجود", 404, "/Books/3", None);
        assert_eq!(err.user_message(), "الكتاب غير موجود");

        let net = StorefrontError::network_error("connection refused", false);
        assert_eq!(net.user_message(), "حدث خطأ في الاتصال بالخادم");
    }
}
