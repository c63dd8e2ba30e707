//! Blob client trait definitions.

use crate::error::ClientResult;
use crate::tracker::TrackerAddr;

/// A client for a key-addressed blob store.
///
/// A client is bound to one domain when it is built; every key is resolved
/// inside that domain. Clients treat blobs as **opaque byte strings** and
/// always move whole objects.
///
/// # Invariants
///
/// - `get` after a successful `put` of the same key returns the stored bytes
/// - `contains` agrees with `get` returning `Some`
/// - Two writers on one key race; the last `put` wins
///
/// # Implementors
///
/// - [`super::MemoryClient`] - Process-local store for tests
/// - [`super::DirClient`] - Directory-backed store
/// - [`super::FailingClient`] - Fault injection wrapper
pub trait BlobClient: Send + Sync {
    /// Returns the domain this client addresses.
    fn domain(&self) -> &str;

    /// Fetches the full blob stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn get(&self, key: &str) -> ClientResult<Option<Vec<u8>>>;

    /// Stores `data` under `key`, replacing any previous blob.
    ///
    /// Returns `Ok(false)` if the store refused the upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn put(&self, key: &str, data: &[u8]) -> ClientResult<bool>;

    /// Deletes the blob stored under `key`.
    ///
    /// What happens for a missing key is up to the implementation.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn delete(&self, key: &str) -> ClientResult<()>;

    /// Returns true if a blob is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn contains(&self, key: &str) -> ClientResult<bool>;
}

/// Builds clients from a domain and an ordered tracker list.
///
/// Connecting must not perform network I/O; a connector only validates its
/// inputs and prepares a client.
pub trait Connector {
    /// The client type this connector builds.
    type Client: BlobClient;

    /// Builds a client for `domain` using `trackers`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs cannot be used to build a client.
    fn connect(&self, domain: &str, trackers: &[TrackerAddr]) -> ClientResult<Self::Client>;
}

impl<T: BlobClient + ?Sized> BlobClient for Box<T> {
    fn domain(&self) -> &str {
        (**self).domain()
    }

    fn get(&self, key: &str) -> ClientResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, data: &[u8]) -> ClientResult<bool> {
        (**self).put(key, data)
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        (**self).delete(key)
    }

    fn contains(&self, key: &str) -> ClientResult<bool> {
        (**self).contains(key)
    }
}
