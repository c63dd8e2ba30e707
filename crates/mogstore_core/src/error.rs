//! Error types for the storage adapter.

use mogstore_client::ClientError;
use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
///
/// Each failure of the blob client surfaces with a specific variant, so
/// callers can tell "not found" from "unreachable" from "rejected".
#[derive(Debug, Error)]
pub enum StorageError {
    /// Settings are missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the problem.
        message: String,
    },

    /// The blob store could not be reached.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(#[from] ClientError),

    /// No blob is stored under the key.
    #[error("not found: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// The store refused to save the blob.
    #[error("unable to save file: {key}")]
    WriteFailure {
        /// The key being saved.
        key: String,
    },

    /// A write was attempted on a handle opened for reading.
    #[error("file was not opened with write access: {key}")]
    AccessDenied {
        /// The handle's key.
        key: String,
    },

    /// The handle has already been closed.
    #[error("I/O operation on closed file: {key}")]
    ClosedHandle {
        /// The handle's key.
        key: String,
    },

    /// The operation cannot be supported by a blob store.
    #[error("operation not supported: {operation}")]
    Unsupported {
        /// Name of the operation.
        operation: &'static str,
    },

    /// An open mode string could not be parsed.
    #[error("invalid open mode: {mode:?}")]
    InvalidMode {
        /// The mode as given.
        mode: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a write failure error.
    pub fn write_failure(key: impl Into<String>) -> Self {
        Self::WriteFailure { key: key.into() }
    }

    /// Creates an access denied error.
    pub fn access_denied(key: impl Into<String>) -> Self {
        Self::AccessDenied { key: key.into() }
    }

    /// Creates a closed handle error.
    pub fn closed_handle(key: impl Into<String>) -> Self {
        Self::ClosedHandle { key: key.into() }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Returns true if the key was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the store could not be reached.
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }

    /// Returns true if the handle was already closed.
    pub fn is_closed_handle(&self) -> bool {
        matches!(self, Self::ClosedHandle { .. })
    }
}

impl From<StorageError> for io::Error {
    fn from(err: StorageError) -> Self {
        let kind = match &err {
            StorageError::Io(e) => e.kind(),
            StorageError::NotFound { .. } => io::ErrorKind::NotFound,
            StorageError::AccessDenied { .. } => io::ErrorKind::PermissionDenied,
            StorageError::Unsupported { .. } => io::ErrorKind::Unsupported,
            StorageError::InvalidMode { .. } | StorageError::Configuration { .. } => {
                io::ErrorKind::InvalidInput
            }
            StorageError::RemoteUnavailable(_)
            | StorageError::WriteFailure { .. }
            | StorageError::ClosedHandle { .. } => io::ErrorKind::Other,
        };
        match err {
            StorageError::Io(e) => e,
            other => io::Error::new(kind, other),
        }
    }
}
