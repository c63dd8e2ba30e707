//! Smoke command implementation.
//!
//! Exercises a live store end to end under random keys: whole writes,
//! chunked writes, reads of blobs stored behind the adapter's back, and
//! seek followed by a partial read. Every key is deleted afterwards.

use super::Storage;
use mogstore_client::BlobClient;
use mogstore_core::{OpenMode, StorageResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::io::SeekFrom;
use tracing::{info, warn};

/// Prefix of every key the smoke test creates.
pub const KEY_PREFIX: &str = "MFSS";

/// Outcome of one smoke check.
#[derive(Debug)]
pub struct CheckResult {
    /// Check name.
    pub name: &'static str,
    /// Key the check used.
    pub key: String,
    /// Failure description, if any.
    pub failure: Option<String>,
}

impl CheckResult {
    fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Runs the smoke command.
pub fn run(storage: &Storage, size: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Running smoke test against domain {:?} with {size}-byte payloads",
        storage.domain()
    );
    println!();

    let results = run_checks(storage, size);
    for result in &results {
        match &result.failure {
            None => println!("  ✓ {}", result.name),
            Some(reason) => println!("  ✗ {} ({}): {reason}", result.name, result.key),
        }
    }

    println!();
    if results.iter().all(CheckResult::is_ok) {
        println!("✓ Smoke test passed");
        Ok(())
    } else {
        println!("✗ Smoke test failed");
        Err("Smoke test failed".into())
    }
}

/// Runs every check and deletes the keys they used.
pub fn run_checks(storage: &Storage, size: usize) -> Vec<CheckResult> {
    let checks: [(&'static str, Check); 4] = [
        ("write then close", write_whole),
        ("chunked write", write_chunked),
        ("read", read_whole),
        ("seek and partial read", seek_partial),
    ];

    let mut results = Vec::with_capacity(checks.len());
    for (name, check) in checks {
        let key = random_key();
        let payload = random_payload(size);
        info!(check = name, key = %key, "running smoke check");

        let failure = match check(storage, &key, &payload) {
            Ok(None) => None,
            Ok(Some(mismatch)) => Some(mismatch),
            Err(e) => Some(e.to_string()),
        };
        if let Err(e) = storage.delete(&key) {
            warn!(key = %key, error = %e, "failed to clean up smoke key");
        }
        results.push(CheckResult { name, key, failure });
    }
    results
}

/// A check returns `Some(reason)` on a content mismatch.
type Check = fn(&Storage, &str, &[u8]) -> StorageResult<Option<String>>;

fn write_whole(storage: &Storage, key: &str, payload: &[u8]) -> StorageResult<Option<String>> {
    let mut file = storage.open_with_mode(key, OpenMode::Write);
    file.write(payload)?;
    file.close()?;
    Ok(compare(storage.client().get(key)?.as_deref(), payload))
}

fn write_chunked(storage: &Storage, key: &str, payload: &[u8]) -> StorageResult<Option<String>> {
    let (head, tail) = payload.split_at(payload.len() / 2);
    let mut file = storage.open_with_mode(key, OpenMode::Write);
    file.write(head)?;
    file.write(tail)?;
    file.close()?;
    Ok(compare(storage.client().get(key)?.as_deref(), payload))
}

fn read_whole(storage: &Storage, key: &str, payload: &[u8]) -> StorageResult<Option<String>> {
    if !storage.client().put(key, payload)? {
        return Ok(Some("store rejected the test blob".to_string()));
    }
    let mut file = storage.open(key);
    let data = file.read(None)?;
    file.close()?;
    Ok(compare(Some(data.as_slice()), payload))
}

fn seek_partial(storage: &Storage, key: &str, payload: &[u8]) -> StorageResult<Option<String>> {
    if !storage.client().put(key, payload)? {
        return Ok(Some("store rejected the test blob".to_string()));
    }
    let start = payload.len() / 2;
    let len = payload.len() / 10;

    let mut file = storage.open(key);
    file.seek(SeekFrom::Start(start as u64))?;
    let position = file.tell()?;
    if position != start as u64 {
        return Ok(Some(format!("tell returned {position}, expected {start}")));
    }
    let data = file.read(Some(len))?;
    file.close()?;
    Ok(compare(Some(data.as_slice()), &payload[start..start + len]))
}

fn compare(actual: Option<&[u8]>, expected: &[u8]) -> Option<String> {
    match actual {
        None => Some("blob missing from store".to_string()),
        Some(actual) if actual == expected => None,
        Some(actual) => Some(format!(
            "content mismatch: got {} bytes, expected {}",
            actual.len(),
            expected.len()
        )),
    }
}

fn random_key() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{KEY_PREFIX}{suffix}")
}

fn random_payload(size: usize) -> Vec<u8> {
    rand::thread_rng().sample_iter(&Alphanumeric).take(size).collect()
}
