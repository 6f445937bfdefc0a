//! Error types for the taskctl CLI

use thiserror::Error;

/// Result type alias for taskctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// True when the failure is an HTTP 401 from the backend.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(ApiError::Unauthorized))
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required (HTTP 401)")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Authentication lifecycle errors.
///
/// `RefreshFailed` and `MissingRefreshToken` are terminal: by the time they
/// surface the stored tokens have already been cleared.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("No refresh token stored. Run `taskctl login` to sign in again.")]
    MissingRefreshToken,

    #[error("Session expired and token refresh failed ({0}). Run `taskctl login` to sign in again.")]
    RefreshFailed(String),

    #[error("Not logged in. Run `taskctl login` first.")]
    NotLoggedIn,
}

/// Task mutation errors. The underlying request failure is kept as the source.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Create failed: {0}")]
    CreateFailed(#[source] Box<Error>),

    #[error("Edit of task {id} failed: {source}")]
    EditFailed {
        id: i64,
        #[source]
        source: Box<Error>,
    },

    #[error("Delete of task {id} failed: {source}")]
    DeleteFailed {
        id: i64,
        #[source]
        source: Box<Error>,
    },

    #[error("Task {0} not found")]
    NotFound(i64),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
