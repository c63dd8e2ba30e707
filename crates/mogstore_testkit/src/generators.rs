//! Property-based test generators using proptest.
//!
//! Provides strategies for keys, payloads and handle operation sequences.

use mogstore_core::OpenMode;
use proptest::prelude::*;

/// Strategy for generating blob keys, optionally with path segments.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9_]{1,12}(/[a-zA-Z0-9_.-]{1,12}){0,2}")
        .expect("Invalid regex")
}

/// Strategy for generating blob content (arbitrary bytes).
pub fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4096)
}

/// Strategy for generating a payload split into write chunks.
pub fn chunks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..512), 0..8)
}

/// Strategy for generating a payload and an offset within or at its end.
pub fn payload_with_offset_strategy() -> impl Strategy<Value = (Vec<u8>, u64)> {
    payload_strategy().prop_flat_map(|payload| {
        let len = payload.len() as u64;
        (Just(payload), 0..=len)
    })
}

/// Strategy for generating a payload, an offset, and a read length.
///
/// The offset may lie past the end of the payload.
pub fn payload_with_range_strategy() -> impl Strategy<Value = (Vec<u8>, u64, usize)> {
    payload_strategy().prop_flat_map(|payload| {
        let len = payload.len() as u64;
        (Just(payload), 0..len + 64, 0usize..1024)
    })
}

/// Strategy for generating open modes.
pub fn open_mode_strategy() -> impl Strategy<Value = OpenMode> {
    prop_oneof![Just(OpenMode::Read), Just(OpenMode::Write)]
}

/// An operation on a write-mode handle.
#[derive(Debug, Clone)]
pub enum HandleOperation {
    /// Append bytes.
    Write(Vec<u8>),
    /// Read up to the given number of bytes, or to the end.
    Read(Option<usize>),
    /// Seek to an absolute position.
    Seek(u64),
    /// Flush to the store.
    Flush,
}

/// Strategy for generating handle operations.
pub fn handle_operation_strategy() -> impl Strategy<Value = HandleOperation> {
    prop_oneof![
        3 => prop::collection::vec(any::<u8>(), 0..256).prop_map(HandleOperation::Write),
        2 => prop::option::of(0usize..512).prop_map(HandleOperation::Read),
        2 => (0u64..1024).prop_map(HandleOperation::Seek),
        1 => Just(HandleOperation::Flush),
    ]
}

/// Strategy for generating a sequence of handle operations.
pub fn handle_operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<HandleOperation>> {
    prop::collection::vec(handle_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
