//! In-memory blob store for testing.

use crate::client::{BlobClient, Connector};
use crate::error::ClientResult;
use crate::tracker::TrackerAddr;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

type Domains = HashMap<String, HashMap<String, Vec<u8>>>;

/// A process-local blob store partitioned by domain.
///
/// Cloning a `MemoryStore` yields another handle to the same data, so
/// several clients (or several adapters) can observe each other's writes,
/// the way independent clients of one remote store would.
///
/// # Example
///
/// ```rust
/// use mogstore_client::{BlobClient, MemoryStore};
///
/// let store = MemoryStore::new();
/// let client = store.client("media");
/// assert!(client.put("avatar.png", b"\x89PNG").unwrap());
/// assert_eq!(store.object("media", "avatar.png").unwrap(), b"\x89PNG");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    domains: Arc<RwLock<Domains>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a client bound to `domain`.
    #[must_use]
    pub fn client(&self, domain: impl Into<String>) -> MemoryClient {
        MemoryClient {
            domain: domain.into(),
            store: self.clone(),
        }
    }

    /// Returns a connector that builds clients over this store.
    #[must_use]
    pub fn connector(&self) -> MemoryConnector {
        MemoryConnector {
            store: self.clone(),
        }
    }

    /// Returns a copy of the blob under `key` in `domain`, bypassing any client.
    #[must_use]
    pub fn object(&self, domain: &str, key: &str) -> Option<Vec<u8>> {
        self.domains
            .read()
            .get(domain)
            .and_then(|keys| keys.get(key))
            .cloned()
    }

    /// Stores a blob directly, bypassing any client.
    ///
    /// Useful for seeding content before a test.
    pub fn insert(&self, domain: &str, key: &str, data: impl Into<Vec<u8>>) {
        self.domains
            .write()
            .entry(domain.to_string())
            .or_default()
            .insert(key.to_string(), data.into());
    }

    /// Returns the number of blobs stored in `domain`.
    #[must_use]
    pub fn len(&self, domain: &str) -> usize {
        self.domains.read().get(domain).map_or(0, HashMap::len)
    }

    /// Returns true if `domain` holds no blobs.
    #[must_use]
    pub fn is_empty(&self, domain: &str) -> bool {
        self.len(domain) == 0
    }

    /// Removes all blobs from every domain.
    pub fn clear(&self) {
        self.domains.write().clear();
    }
}

/// A [`BlobClient`] over a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryClient {
    domain: String,
    store: MemoryStore,
}

impl MemoryClient {
    /// Returns the store this client writes to.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

impl BlobClient for MemoryClient {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn get(&self, key: &str) -> ClientResult<Option<Vec<u8>>> {
        Ok(self.store.object(&self.domain, key))
    }

    fn put(&self, key: &str, data: &[u8]) -> ClientResult<bool> {
        debug!(domain = %self.domain, key, len = data.len(), "memory put");
        self.store.insert(&self.domain, key, data);
        Ok(true)
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        if let Some(keys) = self.store.domains.write().get_mut(&self.domain) {
            keys.remove(key);
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> ClientResult<bool> {
        Ok(self
            .store
            .domains
            .read()
            .get(&self.domain)
            .is_some_and(|keys| keys.contains_key(key)))
    }
}

/// Builds [`MemoryClient`]s over a shared [`MemoryStore`].
///
/// Trackers are validated by the caller and otherwise ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    store: MemoryStore,
}

impl MemoryConnector {
    /// Creates a connector over a fresh store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store clients will share.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

impl Connector for MemoryConnector {
    type Client = MemoryClient;

    fn connect(&self, domain: &str, _trackers: &[TrackerAddr]) -> ClientResult<MemoryClient> {
        Ok(self.store.client(domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty("media"));
        assert_eq!(store.object("media", "a"), None);
    }

    #[test]
    fn memory_put_then_get() {
        let store = MemoryStore::new();
        let client = store.client("media");

        assert!(client.put("a", b"hello").unwrap());
        assert_eq!(client.get("a").unwrap().unwrap(), b"hello");
        assert!(client.contains("a").unwrap());
    }

    #[test]
    fn memory_get_missing_is_none() {
        let client = MemoryStore::new().client("media");
        assert!(client.get("missing").unwrap().is_none());
        assert!(!client.contains("missing").unwrap());
    }

    #[test]
    fn memory_put_replaces() {
        let client = MemoryStore::new().client("media");
        client.put("a", b"first").unwrap();
        client.put("a", b"second").unwrap();
        assert_eq!(client.get("a").unwrap().unwrap(), b"second");
    }

    #[test]
    fn memory_delete() {
        let client = MemoryStore::new().client("media");
        client.put("a", b"x").unwrap();
        client.delete("a").unwrap();
        assert!(!client.contains("a").unwrap());

        // Missing keys are ignored.
        client.delete("a").unwrap();
    }

    #[test]
    fn memory_domains_are_isolated() {
        let store = MemoryStore::new();
        let media = store.client("media");
        let thumbs = store.client("thumbs");

        media.put("a", b"x").unwrap();
        assert!(!thumbs.contains("a").unwrap());
        assert_eq!(store.len("media"), 1);
        assert_eq!(store.len("thumbs"), 0);
    }

    #[test]
    fn memory_clients_share_store() {
        let connector = MemoryConnector::new();
        let trackers = vec![TrackerAddr::new("localhost", 7001).unwrap()];
        let writer = connector.connect("media", &trackers).unwrap();
        let reader = connector.connect("media", &trackers).unwrap();

        writer.put("shared", b"data").unwrap();
        assert_eq!(reader.get("shared").unwrap().unwrap(), b"data");
        assert_eq!(reader.domain(), "media");
    }

    #[test]
    fn memory_clear() {
        let store = MemoryStore::new();
        store.insert("media", "a", b"x".to_vec());
        store.clear();
        assert!(store.is_empty("media"));
    }
}
