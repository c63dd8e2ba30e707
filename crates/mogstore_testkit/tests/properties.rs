//! Property tests for remote file handles.

use mogstore_core::{FlushPolicy, OpenMode};
use mogstore_testkit::prelude::*;
use proptest::prelude::*;
use std::io::SeekFrom;

/// Reference model of a write-mode handle over a single-writer store.
struct Model {
    policy: FlushPolicy,
    stored: Option<Vec<u8>>,
    buffer: Option<Vec<u8>>,
    position: u64,
    dirty: bool,
}

impl Model {
    fn new(policy: FlushPolicy) -> Self {
        Self {
            policy,
            stored: None,
            buffer: None,
            position: 0,
            dirty: false,
        }
    }

    /// An empty buffer after a flush picks up the saved blob first.
    fn write(&mut self, data: &[u8]) {
        let stored = &self.stored;
        let buffer = self
            .buffer
            .get_or_insert_with(|| stored.clone().unwrap_or_default());
        buffer.extend_from_slice(data);
        self.position = buffer.len() as u64;
        self.dirty = true;
    }

    /// Returns `None` where the handle must report a missing blob.
    fn read(&mut self, limit: Option<usize>) -> Option<Vec<u8>> {
        if self.buffer.is_none() {
            self.buffer = Some(self.stored.clone()?);
        }
        let buffer = self.buffer.as_deref().unwrap_or_default();
        let len = buffer.len();
        let start = usize::try_from(self.position).map_or(len, |p| p.min(len));
        let end = limit.map_or(len, |n| (start + n).min(len));
        self.position += (end - start) as u64;
        Some(buffer[start..end].to_vec())
    }

    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        self.stored = self.buffer.clone();
        self.dirty = false;
        if self.policy == FlushPolicy::Refetch {
            self.buffer = None;
        }
    }
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn write_close_read_round_trip(key in key_strategy(), payload in payload_strategy()) {
        let fixture = MemoryFixture::new();
        let mut file = fixture.open_with_mode(&key, OpenMode::Write);
        prop_assert_eq!(file.write(&payload).unwrap(), payload.len());
        file.close().unwrap();

        prop_assert_eq!(fixture.open(&key).read(None).unwrap(), payload);
    }

    #[test]
    fn chunked_write_equals_single_write(chunks in chunks_strategy()) {
        let fixture = MemoryFixture::new();

        let mut file = fixture.open_with_mode("chunked", OpenMode::Write);
        for chunk in &chunks {
            file.write(chunk).unwrap();
        }
        file.close().unwrap();

        let mut file = fixture.open_with_mode("single", OpenMode::Write);
        file.write(&chunks.concat()).unwrap();
        file.close().unwrap();

        prop_assert_eq!(fixture.stored("chunked"), fixture.stored("single"));
    }

    #[test]
    fn seek_then_tell((payload, offset) in payload_with_offset_strategy()) {
        let fixture = MemoryFixture::new();
        fixture.seed("k", payload);

        let mut file = fixture.open("k");
        prop_assert_eq!(file.seek(SeekFrom::Start(offset)).unwrap(), offset);
        prop_assert_eq!(file.tell().unwrap(), offset);
    }

    #[test]
    fn seek_then_read_is_sub_slice((payload, offset, len) in payload_with_range_strategy()) {
        let fixture = MemoryFixture::new();
        fixture.seed("k", payload.clone());

        let mut file = fixture.open("k");
        file.seek(SeekFrom::Start(offset)).unwrap();
        let chunk = file.read(Some(len)).unwrap();

        let start = (offset as usize).min(payload.len());
        let end = (start + len).min(payload.len());
        prop_assert_eq!(chunk, payload[start..end].to_vec());
    }

    #[test]
    fn handle_matches_model(
        ops in handle_operation_sequence_strategy(1, 24),
        keep_cache in any::<bool>()
    ) {
        let policy = if keep_cache { FlushPolicy::KeepCache } else { FlushPolicy::Refetch };
        let fixture = MemoryFixture::with_policy(policy);
        let mut model = Model::new(policy);
        let mut file = fixture.open_with_mode("model", OpenMode::Write);

        for op in &ops {
            match op {
                HandleOperation::Write(data) => {
                    model.write(data);
                    prop_assert_eq!(file.write(data).unwrap(), data.len());
                }
                HandleOperation::Read(limit) => match model.read(*limit) {
                    Some(expected) => prop_assert_eq!(file.read(*limit).unwrap(), expected),
                    None => prop_assert!(file.read(*limit).unwrap_err().is_not_found()),
                },
                HandleOperation::Seek(position) => {
                    model.position = *position;
                    prop_assert_eq!(file.seek(SeekFrom::Start(*position)).unwrap(), *position);
                }
                HandleOperation::Flush => {
                    model.flush();
                    file.flush().unwrap();
                }
            }
            prop_assert_eq!(file.is_dirty(), model.dirty);
        }

        model.flush();
        file.close().unwrap();
        prop_assert_eq!(fixture.stored("model"), model.stored);
    }
}
