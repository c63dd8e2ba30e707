//! A fault-injecting client wrapper for testing.

use crate::client::BlobClient;
use crate::error::{ClientError, ClientResult};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Wraps a client and fails calls on demand.
///
/// - `set_unreachable(true)` makes every call fail with
///   [`ClientError::Unreachable`]
/// - `set_reject_puts(true)` makes `put` report `Ok(false)`
///
/// Counters record how many calls reached the inner client, which lets
/// tests assert that an operation performed no remote I/O.
#[derive(Debug)]
pub struct FailingClient<C> {
    inner: C,
    unreachable: AtomicBool,
    reject_puts: AtomicBool,
    gets: AtomicU64,
    puts: AtomicU64,
}

impl<C: BlobClient> FailingClient<C> {
    /// Wraps `inner` with all faults disabled.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            unreachable: AtomicBool::new(false),
            reject_puts: AtomicBool::new(false),
            gets: AtomicU64::new(0),
            puts: AtomicU64::new(0),
        }
    }

    /// Returns the wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Sets whether every call fails as unreachable.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Sets whether `put` reports a rejected upload.
    pub fn set_reject_puts(&self, reject: bool) {
        self.reject_puts.store(reject, Ordering::SeqCst);
    }

    /// Number of `get` calls forwarded to the inner client.
    pub fn get_count(&self) -> u64 {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `put` calls forwarded to the inner client.
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::SeqCst)
    }

    fn check_reachable(&self) -> ClientResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(ClientError::unreachable("injected fault: trackers unreachable"))
        } else {
            Ok(())
        }
    }
}

impl<C: BlobClient> BlobClient for FailingClient<C> {
    fn domain(&self) -> &str {
        self.inner.domain()
    }

    fn get(&self, key: &str) -> ClientResult<Option<Vec<u8>>> {
        self.check_reachable()?;
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn put(&self, key: &str, data: &[u8]) -> ClientResult<bool> {
        self.check_reachable()?;
        if self.reject_puts.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, data)
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        self.check_reachable()?;
        self.inner.delete(key)
    }

    fn contains(&self, key: &str) -> ClientResult<bool> {
        self.check_reachable()?;
        self.inner.contains(key)
    }
}
