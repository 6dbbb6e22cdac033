//! REST API client for the back-office backend.
//!
//! # Architecture
//!
//! - One [`ApiClient`] per session, cheaply cloneable (`Arc` inner)
//! - Bearer token cached in memory; [`crate::api::ApiClient::login`] fills
//!   it, [`logout`](ApiClient::logout) clears it
//! - Single-shot requests - no retry or backoff in this layer
//! - Reads and writes of single entities use the `{ "data": ... }` envelope;
//!   failures carry `{ "message", "errors"? }`
//!
//! # Example
//!
//! ```rust,ignore
//! use backoffice_client::api::ApiClient;
//!
//! let client = ApiClient::new(&config);
//! client.login(&email, "password").await?;
//!
//! let products = client.get_products().await?;
//! let product = client.get_product("walnut-desk").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::multipart::{BoolStyle, FileUpload, FormMap, WireValue, flatten};

mod auth;
mod categories;
mod products;
mod users;

pub use auth::RegisterInput;
pub use categories::CategoryInput;
pub use users::UserInput;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not parse.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server refused the request (non-2xx with an error body).
    #[error("Request rejected ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        /// Per-field messages, when the backend returns them.
        errors: HashMap<String, Vec<String>>,
    },

    /// A staged file carries a malformed content type.
    #[error("Invalid upload: {0}")]
    Upload(String),

    /// Update called on a draft that was never persisted.
    #[error("Slug is required for updates")]
    MissingSlug,
}

/// Standard single-entity response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body the backend sends on rejection.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: HashMap<String, Vec<String>>,
}

/// Back-office REST API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    http: reqwest::Client,
    /// Base URL without a trailing slash (e.g. `http://localhost:8000/api`).
    base_url: String,
    /// In-memory bearer token; session persistence is the caller's concern.
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// A token already present in the configuration (e.g. from the
    /// environment) is cached immediately.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let token = config
            .token
            .as_ref()
            .map(|secret| secret.expose_secret().to_owned());

        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                token: RwLock::new(token),
            }),
        }
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // =========================================================================
    // Token cache
    // =========================================================================

    /// Set the bearer token directly (for loading from storage).
    pub async fn set_token(&self, token: String) {
        *self.inner.token.write().await = Some(token);
    }

    /// Whether a token is cached.
    pub async fn has_token(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    /// Clear the cached token.
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    async fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.inner.token.read().await;
        match token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let builder = self.inner.http.get(self.url(path));
        Ok(self.authed(builder).await.send().await?)
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        Ok(self.authed(builder).await.send().await?)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Read a `{ "data": T }` envelope, mapping error statuses.
    pub(crate) async fn read_envelope<T: DeserializeOwned>(
        &self,
        response: Response,
        what: &str,
    ) -> Result<T, ApiError> {
        let envelope: Envelope<T> = self.read_body(response, what).await?;
        Ok(envelope.data)
    }

    /// Read a bare JSON body, mapping error statuses.
    pub(crate) async fn read_body<T: DeserializeOwned>(
        &self,
        response: Response,
        what: &str,
    ) -> Result<T, ApiError> {
        let response = check_status(response, what).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`read_body`](Self::read_body) for endpoints whose response
    /// body is irrelevant (deletes, logout).
    pub(crate) async fn read_unit(&self, response: Response, what: &str) -> Result<(), ApiError> {
        check_status(response, what).await.map(|_| ())
    }
}

/// Map error statuses to [`ApiError`]; pass successful responses through.
async fn check_status(response: Response, what: &str) -> Result<Response, ApiError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized(rejection_message(response).await));
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(what.to_owned()));
    }

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or(ErrorBody {
            message: text,
            errors: HashMap::new(),
        });
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: body.message,
            errors: body.errors,
        });
    }

    Ok(response)
}

async fn rejection_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.message)
}

/// Build a `reqwest` multipart form from a flattened value graph.
///
/// # Errors
///
/// Returns [`ApiError::Upload`] when a staged file's content type is not a
/// valid MIME string.
pub(crate) fn multipart_form(
    map: FormMap,
    bools: BoolStyle,
) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for part in flatten(map, bools) {
        form = match part.value {
            WireValue::Text(text) => form.text(part.key, text),
            WireValue::File(file) => form.part(part.key, file_part(file)?),
        };
    }
    Ok(form)
}

fn file_part(file: FileUpload) -> Result<reqwest::multipart::Part, ApiError> {
    reqwest::multipart::Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|err| ApiError::Upload(err.to_string()))
}
