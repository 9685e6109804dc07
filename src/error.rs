//! Error types for the call abstraction and the logging layer.
//!
//! Every variant here is a *recoverable* call failure: a value the embedding
//! framework can hand to a callback or return from `execute`, and that the
//! logging wrapper reports via [`Logger::on_failure`](crate::Logger) before
//! passing it through unchanged. Fatal runtime conditions (out-of-memory,
//! stack exhaustion) are panics in this model and deliberately have no
//! variant: the wrapper never catches or logs them.

use http::StatusCode;

/// The error type for HTTP calls and for the logging layer itself.
///
/// # Examples
///
/// ```
/// use overhear::Error;
/// use http::StatusCode;
///
/// let err = Error::Decode {
///     message: "expected value at line 1 column 1".to_string(),
///     status: StatusCode::OK,
/// };
///
/// assert_eq!(err.status(), Some(StatusCode::OK));
/// assert!(!err.is_transport());
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A transport-level error occurred (connection failed, reset, DNS
    /// lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// The exchange took longer than the call's configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The response arrived but its body could not be decoded into the
    /// call's value type.
    #[error("Failed to decode response body (status {status}): {message}")]
    Decode {
        /// The decoder's error message.
        message: String,
        /// The HTTP status code of the response being decoded.
        status: StatusCode,
    },

    /// The request could not be built.
    ///
    /// When this surfaces through the logging layer, the logger has already
    /// been told via the [`RequestBody::Unbuilt`](crate::RequestBody::Unbuilt)
    /// sentinel that no body value was determinable.
    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// The call was canceled before completing.
    #[error("Call was canceled")]
    Canceled,

    /// Invalid construction input, such as a success response created with a
    /// non-success status code.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A one-shot error body was read a second time.
    ///
    /// Loggers receive a peeked duplicate and can never trigger this on the
    /// caller's body; seeing it means the same view was consumed twice.
    #[error("Error body already consumed")]
    BodyConsumed,
}

impl Error {
    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this error originated below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout)
    }
}

/// A specialized `Result` type for call execution and logging helpers.
pub type Result<T> = std::result::Result<T, Error>;
