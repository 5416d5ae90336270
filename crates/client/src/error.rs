use std::time::Duration;

use groupings_core::CoreError;

/// Errors from the groupings client.
///
/// Every client operation resolves to a value of this type on failure;
/// nothing panics on network or decoding problems. An application-level
/// `resultCode: "FAILURE"` is not an error and arrives as a normal
/// [`ApiResponse`](groupings_core::ApiResponse).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Groupings API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configured polling bound was reached before the job completed.
    #[error("Job still in progress after {attempts} polls ({elapsed:?})")]
    PollLimit { attempts: u32, elapsed: Duration },

    /// Polling was cancelled by the caller.
    #[error("Job polling cancelled")]
    Cancelled,

    /// The acting user's uid cannot be sent as a header value.
    #[error("Invalid current_user header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Input rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] CoreError),
}

/// Errors while loading [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}
