//! Put command implementation.

use super::Storage;
use mogstore_core::OpenMode;
use std::fs::File;
use std::io;
use std::path::Path;

/// Runs the put command.
pub fn run(storage: &Storage, key: &str, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = File::open(path)
        .map_err(|e| format!("Cannot open {}: {e}", path.display()))?;

    let mut file = storage.open_with_mode(key, OpenMode::Write);
    let copied = io::copy(&mut source, &mut file)?;
    file.close()?;

    println!("Stored {copied} bytes under {key:?} in domain {:?}", storage.domain());
    Ok(())
}
