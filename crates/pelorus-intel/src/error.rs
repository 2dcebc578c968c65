//! Intelligence provider error types.

/// Errors from upstream intelligence provider calls.
///
/// Every variant carries the endpoint label (`"GET /vesselsanctions_v2"`)
/// so a failed check's evidence can say exactly which call broke.
#[derive(Debug, thiserror::Error)]
pub enum IntelError {
    /// The provider rejected our credentials or permissions (HTTP 403).
    ///
    /// Surfaced distinctly from other HTTP failures: this means the token
    /// is invalid, expired, or lacks the entitlement — retrying will not
    /// help and the operator needs to know.
    #[error("provider denied access to {endpoint} (HTTP 403): {body}")]
    AuthDenied {
        /// The endpoint that was called.
        endpoint: String,
        /// Response body excerpt for diagnostics.
        body: String,
    },

    /// HTTP transport failure (connection refused, DNS, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The endpoint that was called.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The request timed out.
    #[error("timeout calling {endpoint} after {timeout_secs}s")]
    Timeout {
        /// The endpoint that was called.
        endpoint: String,
        /// The configured per-call timeout.
        timeout_secs: u64,
    },

    /// The provider returned a non-success status other than 403.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Api {
        /// The endpoint that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt for diagnostics.
        body: String,
    },

    /// Response body could not be decoded into the expected shape.
    #[error("failed to decode response from {endpoint}: {detail}")]
    Decode {
        /// The endpoint that was called.
        endpoint: String,
        /// What went wrong during decoding.
        detail: String,
    },
}

impl IntelError {
    /// The endpoint label this error occurred on.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::AuthDenied { endpoint, .. }
            | Self::Http { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::Api { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }

    /// Whether this failure is a credential/permission problem.
    pub fn is_auth_denied(&self) -> bool {
        matches!(self, Self::AuthDenied { .. })
    }
}
