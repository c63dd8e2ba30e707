//! Test fixtures and storage helpers.
//!
//! Provides storages wired to local blob stores so tests can observe the
//! store directly, inject faults, and open second adapters on the same data.

use mogstore_client::{DirClient, DirConnector, FailingClient, MemoryClient, MemoryStore};
use mogstore_core::{FlushPolicy, MogileStorage, StorageConfig};
use std::path::Path;
use tempfile::TempDir;

/// Domain used by all fixtures.
pub const TEST_DOMAIN: &str = "testdomain";

/// Tracker list used by all fixtures.
pub const TEST_TRACKERS: &str = "127.0.0.1:7001,127.0.0.2:7001";

/// Returns a valid configuration for [`TEST_DOMAIN`].
pub fn test_config() -> StorageConfig {
    StorageConfig::parse(TEST_DOMAIN, TEST_TRACKERS).expect("Fixture configuration is valid")
}

/// A storage over a shared in-memory store.
///
/// The client is wrapped in a [`FailingClient`], so tests can make the store
/// unreachable or reject uploads, and can count remote calls.
pub struct MemoryFixture {
    /// The shared store behind the storage.
    pub store: MemoryStore,
    /// The storage under test.
    pub storage: MogileStorage<FailingClient<MemoryClient>>,
}

impl MemoryFixture {
    /// Creates a fixture with the default flush policy.
    pub fn new() -> Self {
        Self::with_policy(FlushPolicy::default())
    }

    /// Creates a fixture with the given flush policy.
    pub fn with_policy(policy: FlushPolicy) -> Self {
        let store = MemoryStore::new();
        let client = FailingClient::new(store.client(TEST_DOMAIN));
        let storage = MogileStorage::with_client(test_config().with_flush_policy(policy), client)
            .expect("Failed to build memory storage");
        Self { store, storage }
    }

    /// Opens a second, independent adapter on the same store.
    pub fn second_adapter(&self) -> MogileStorage<MemoryClient> {
        MogileStorage::connect(test_config(), &self.store.connector())
            .expect("Failed to build second adapter")
    }

    /// Stores `content` under `key`, bypassing the adapter.
    pub fn seed(&self, key: &str, content: impl Into<Vec<u8>>) {
        self.store.insert(TEST_DOMAIN, key, content);
    }

    /// Returns what the store holds under `key`, bypassing the adapter.
    pub fn stored(&self, key: &str) -> Option<Vec<u8>> {
        self.store.object(TEST_DOMAIN, key)
    }

    /// Returns the fault-injecting client.
    pub fn client(&self) -> &FailingClient<MemoryClient> {
        self.storage.client()
    }
}

impl Default for MemoryFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for MemoryFixture {
    type Target = MogileStorage<FailingClient<MemoryClient>>;

    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

/// A storage over a directory store in a temporary directory.
pub struct DirFixture {
    /// The storage under test.
    pub storage: MogileStorage<DirClient>,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: TempDir,
}

impl DirFixture {
    /// Creates a fixture in a fresh temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let storage = MogileStorage::connect(test_config(), &DirConnector::new(temp_dir.path()))
            .expect("Failed to build directory storage");
        Self { storage, temp_dir }
    }

    /// Returns the store root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Opens a new adapter with a new client over the same directory.
    pub fn reopen(&self) -> MogileStorage<DirClient> {
        MogileStorage::connect(test_config(), &DirConnector::new(self.root()))
            .expect("Failed to reopen directory storage")
    }
}

impl Default for DirFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for DirFixture {
    type Target = MogileStorage<DirClient>;

    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

/// Runs a test against a fresh in-memory storage.
///
/// # Example
///
/// ```rust
/// use mogstore_testkit::with_memory_storage;
///
/// with_memory_storage(|storage| {
///     assert!(!storage.exists("nothing").unwrap());
/// });
/// ```
pub fn with_memory_storage<F, R>(f: F) -> R
where
    F: FnOnce(&MogileStorage<FailingClient<MemoryClient>>) -> R,
{
    let fixture = MemoryFixture::new();
    f(&fixture.storage)
}

/// Runs a test against a fresh directory storage.
pub fn with_dir_storage<F, R>(f: F) -> R
where
    F: FnOnce(&MogileStorage<DirClient>) -> R,
{
    let fixture = DirFixture::new();
    f(&fixture.storage)
}
