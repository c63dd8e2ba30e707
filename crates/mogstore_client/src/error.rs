//! Error types for blob client operations.

use std::io;
use thiserror::Error;

/// Result type for blob client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors reported by a blob client.
///
/// A missing key is not an error at this layer: `get` reports it as
/// `Ok(None)` and `put` reports a rejected upload as `Ok(false)`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The store or its trackers could not be reached.
    #[error("store unreachable: {message}")]
    Unreachable {
        /// Description of the transport failure.
        message: String,
    },

    /// A tracker endpoint could not be parsed.
    #[error("invalid tracker endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// The endpoint as given.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A domain name cannot be used by the store.
    #[error("invalid domain {domain:?}: {reason}")]
    InvalidDomain {
        /// The domain as given.
        domain: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An I/O error occurred in a local store.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ClientError {
    /// Creates an unreachable-store error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Creates an invalid endpoint error.
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid domain error.
    pub fn invalid_domain(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ClientError::unreachable("connection refused");
        assert_eq!(err.to_string(), "store unreachable: connection refused");

        let err = ClientError::invalid_endpoint("host:abc", "port is not a number");
        assert!(err.to_string().contains("host:abc"));
        assert!(err.to_string().contains("port is not a number"));

        let err = ClientError::invalid_domain("../x", "must be a single path component");
        assert_eq!(
            err.to_string(),
            "invalid domain \"../x\": must be a single path component"
        );
    }
}
