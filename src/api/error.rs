//! Error taxonomy for collaborator calls.
//!
//! Every failed call ends in exactly one of these variants; callers turn
//! them into user-visible notifications. Nothing here retries, and no
//! variant is fatal to the process.

/// Failure of a remote HIMS call.
///
/// Variants hold owned strings so the mock client can script them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No bearer token in the store, or the server rejected it (401).
    /// The surrounding app redirects to login; this core only reports.
    #[error("Authentication required")]
    AuthRequired,
    /// Could not reach the backend at all.
    #[error("Cannot reach the server: {0}")]
    Connection(String),
    /// The request went out but timed out waiting for a response.
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Transport-level failure other than connect/timeout.
    #[error("Request failed: {0}")]
    Http(String),
    /// Non-2xx response; `message` is the server-provided text when
    /// present, else a generic fallback.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// 2xx response whose body reports `isSuccess: false`.
    #[error("Operation rejected: {0}")]
    Rejected(String),
    /// Body did not match the expected envelope.
    #[error("Unexpected response format")]
    UnexpectedFormat,
}

impl ApiError {
    /// Map a transport error, distinguishing connect vs timeout vs
    /// everything else.
    pub(crate) fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_connect() {
            ApiError::Connection(err.to_string())
        } else if err.is_timeout() {
            ApiError::Timeout(timeout_secs)
        } else {
            ApiError::Http(err.to_string())
        }
    }
}
