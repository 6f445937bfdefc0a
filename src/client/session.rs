//! Shared HTTP session for the task API
//!
//! A [`SessionClient`] owns the `reqwest` client, the base URL, and the mutable
//! default `Authorization` header that every request inherits. One instance is
//! built per process and handed out by `Arc`.

use std::time::Duration;

use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::error::{ApiError, Result};

/// Request timeout applied to every call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Format a bearer `Authorization` header value
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Which `Authorization` header a request carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthHeader {
    /// Inherit the session's default header (if any)
    #[default]
    Inherit,
    /// Send this bearer token regardless of the default
    Bearer(String),
    /// Send no `Authorization` header at all
    Omit,
}

/// A single outgoing API request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub authorization: AuthHeader,
    /// Set once the request has been replayed after a token refresh
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            authorization: AuthHeader::Inherit,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn body(mut self, body: Option<serde_json::Value>) -> Self {
        self.body = body;
        self
    }

    pub fn authorization(mut self, authorization: AuthHeader) -> Self {
        self.authorization = authorization;
        self
    }
}

/// Successful (2xx) API response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
        })
    }
}

/// HTTP client bound to the API base URL
pub struct SessionClient {
    http: HttpClient,
    base_url: String,
    default_authorization: RwLock<Option<String>>,
}

impl SessionClient {
    /// Create a session for `base_url` (must end with `/`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            default_authorization: RwLock::new(None),
        })
    }

    /// Absolute URL of an endpoint path such as `tasks/`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Set the default `Authorization: Bearer <token>` header
    pub async fn set_bearer(&self, token: &str) {
        *self.default_authorization.write().await = Some(bearer(token));
    }

    /// Drop the default `Authorization` header
    pub async fn clear_authorization(&self) {
        *self.default_authorization.write().await = None;
    }

    /// Current default `Authorization` header value
    pub async fn authorization(&self) -> Option<String> {
        self.default_authorization.read().await.clone()
    }

    /// Bearer token a request will be sent with, after applying the default
    pub async fn bearer_token_for(&self, request: &ApiRequest) -> Option<String> {
        match &request.authorization {
            AuthHeader::Bearer(token) => Some(token.clone()),
            AuthHeader::Omit => None,
            AuthHeader::Inherit => self
                .authorization()
                .await
                .and_then(|h| h.strip_prefix("Bearer ").map(str::to_string)),
        }
    }

    /// Send a request with the default headers
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        self.send(&ApiRequest::new(method, path).body(body.cloned()))
            .await
    }

    /// Send a request. Non-2xx statuses come back as [`ApiError`] values.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = self.http.request(request.method.clone(), &url);

        let header = match &request.authorization {
            AuthHeader::Inherit => self.authorization().await,
            AuthHeader::Bearer(token) => Some(bearer(token)),
            AuthHeader::Omit => None,
        };
        if let Some(value) = header {
            builder = builder.header(reqwest::header::AUTHORIZATION, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!(
            "{} {} -> {}{}",
            request.method,
            url,
            status.as_u16(),
            if request.retried { " (replay)" } else { "" }
        );

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            Ok(ApiResponse { status, body })
        } else {
            Err(status_error(status, body).into())
        }
    }
}

/// Map an error status to an [`ApiError`]
fn status_error(status: StatusCode, body: String) -> ApiError {
    let detail = |fallback: &str| {
        if body.trim().is_empty() {
            fallback.to_string()
        } else {
            body.clone()
        }
    };

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(detail("Resource not found")),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(detail("Bad request"))
        }
        status if status.is_server_error() => {
            ApiError::ServerError(detail(&format!("Server error: {}", status)))
        }
        status => ApiError::UnexpectedStatus(status.as_u16()),
    }
}
