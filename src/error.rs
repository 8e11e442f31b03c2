//! Error types for Asana API calls.
//!
//! Every failure the pipeline can produce is a variant of [`Error`]. Errors
//! reported by the server are classified into an [`ApiError`] so callers can
//! tell a missing resource from an expired token or a rate limit without
//! matching on message text.

use http::StatusCode;
use std::fmt;
use std::time::Duration;

/// The coarse classification of a failed API response.
///
/// See [`crate::classify::classify`] for the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 401: the token is missing, expired or revoked.
    Auth,
    /// 404: the resource does not exist or is not visible.
    NotFound,
    /// 413: the request body exceeded the server limit.
    PayloadTooLarge,
    /// 429: the rate limit was enforced. Carries a retry hint.
    RateLimited,
    /// 5xx: a transient server failure the caller may retry.
    Recoverable,
    /// Any other status.
    Other,
}

impl ApiErrorKind {
    /// Maps an HTTP status code onto its classification.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => ApiErrorKind::Auth,
            404 => ApiErrorKind::NotFound,
            413 => ApiErrorKind::PayloadTooLarge,
            429 => ApiErrorKind::RateLimited,
            500..=599 => ApiErrorKind::Recoverable,
            _ => ApiErrorKind::Other,
        }
    }

    /// Returns `true` for the classifications a caller may reasonably retry.
    pub fn is_retryable(self) -> bool {
        matches!(self, ApiErrorKind::RateLimited | ApiErrorKind::Recoverable)
    }
}

/// An error reported by the Asana API.
///
/// Built once when a response is classified and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: StatusCode,
    /// The classification derived from `status`.
    pub kind: ApiErrorKind,
    /// A short machine-readable label such as `not_found` or `unknown`.
    pub error_type: String,
    /// The message supplied by the API, or the status text.
    pub message: String,
    /// An optional human-readable phrase returned with 5xx errors.
    pub phrase: Option<String>,
    /// An optional pointer to documentation.
    pub help: Option<String>,
    /// How long to wait before retrying. Always set for rate limits.
    pub retry_after: Option<Duration>,
    /// The correlation id generated for the request.
    pub request_id: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)?;
        if let Some(phrase) = &self.phrase {
            write!(f, " ({})", phrase)?;
        }
        write!(f, " [status {}, request {}]", self.status.as_u16(), self.request_id)
    }
}

impl std::error::Error for ApiError {}

/// The main error type for Asana API calls.
///
/// # Examples
///
/// ```no_run
/// use asana_client::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder().access_token("0/123").build()?;
///
/// match client.get::<_, serde_json::Value>("/tasks/1", (), &[]).await {
///     Ok(response) => println!("Task: {}", response.data),
///     Err(e) if e.is_not_found_error() => println!("No such task"),
///     Err(e) if e.is_rate_limited() => {
///         println!("Slow down for {:?}", e.retry_after());
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A request payload failed its client-side checks. No request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The options or request data could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encoding(String),

    /// The transport failed before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status other than 200 or 201 (any non-2xx
    /// for a DELETE), or with a body that was not a valid response envelope.
    #[error("API error {0}")]
    Api(#[from] ApiError),

    /// The response `data` did not match the expected shape.
    #[error("Failed to decode response data (status {status}, request {request_id}): {serde_error}")]
    Decode {
        /// The raw JSON that failed to decode
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
        /// The correlation id of the request
        request_id: String,
    },

    /// The server returned a 2xx response without a `data` payload.
    #[error("Missing data from response (status {status}, request {request_id})")]
    Protocol {
        /// The HTTP status code
        status: StatusCode,
        /// The correlation id of the request
        request_id: String,
    },

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A cache backend failed.
    #[error("Cache storage error: {0}")]
    Storage(String),

    /// The retry helper gave up.
    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// The number of attempts made
        attempts: usize,
        /// The last error encountered
        last_error: Box<Error>,
    },

    /// An error wrapped with a short description of the failed operation.
    #[error("{context}: {source}")]
    Context {
        /// What was being attempted
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps this error with a short description of the failed operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping any [`Error::Context`] layers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            Error::MaxRetriesExceeded { last_error, .. } => last_error.root(),
            other => other,
        }
    }

    /// Returns the classified API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self.root() {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    fn kind(&self) -> Option<ApiErrorKind> {
        self.api_error().map(|e| e.kind)
    }

    /// Returns `true` for a 401 response.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == Some(ApiErrorKind::Auth)
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found_error(&self) -> bool {
        self.kind() == Some(ApiErrorKind::NotFound)
    }

    /// Returns `true` for a 413 response.
    pub fn is_payload_too_large(&self) -> bool {
        self.kind() == Some(ApiErrorKind::PayloadTooLarge)
    }

    /// Returns `true` for a 429 response.
    pub fn is_rate_limited(&self) -> bool {
        self.kind() == Some(ApiErrorKind::RateLimited)
    }

    /// Returns `true` for a 5xx response.
    pub fn is_recoverable_error(&self) -> bool {
        self.kind() == Some(ApiErrorKind::Recoverable)
    }

    /// Returns `true` if retrying the same call could succeed.
    ///
    /// Rate limits and 5xx responses are retryable. Transport errors are
    /// retryable only when they are timeouts or connection failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use asana_client::{ApiError, ApiErrorKind, Error};
    /// use http::StatusCode;
    ///
    /// let err = Error::Api(ApiError {
    ///     status: StatusCode::SERVICE_UNAVAILABLE,
    ///     kind: ApiErrorKind::Recoverable,
    ///     error_type: "server_error".to_string(),
    ///     message: "Service Unavailable".to_string(),
    ///     phrase: None,
    ///     help: None,
    ///     retry_after: None,
    ///     request_id: "r1".to_string(),
    /// });
    ///
    /// assert!(err.is_retryable());
    /// assert!(!Error::Validation("bad".to_string()).is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self.root() {
            Error::Api(err) => err.kind.is_retryable(),
            Error::Transport(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }

    /// Returns the server's retry hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        self.api_error()?.retry_after
    }

    /// Returns the HTTP status code if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self.root() {
            Error::Api(err) => Some(err.status),
            Error::Decode { status, .. } => Some(*status),
            Error::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the correlation id of the failed request, when known.
    pub fn request_id(&self) -> Option<&str> {
        match self.root() {
            Error::Api(err) => Some(&err.request_id),
            Error::Decode { request_id, .. } => Some(request_id),
            Error::Protocol { request_id, .. } => Some(request_id),
            _ => None,
        }
    }
}

/// Adds [`Error::context`] to `Result`s.
pub trait ResultExt<T> {
    /// Wraps the error, if any, with a short description.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }
}

/// A specialized `Result` type for Asana API calls.
pub type Result<T> = std::result::Result<T, Error>;
