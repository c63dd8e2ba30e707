//! Get command implementation.

use super::Storage;
use std::fs::File;
use std::io;
use std::path::Path;

/// Runs the get command, writing to `output` or stdout.
pub fn run(
    storage: &Storage,
    key: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = storage.open(key);

    let copied = match output {
        Some(path) => {
            let mut dest = File::create(path)
                .map_err(|e| format!("Cannot create {}: {e}", path.display()))?;
            let copied = io::copy(&mut file, &mut dest)?;
            dest.sync_all()?;
            eprintln!("Wrote {copied} bytes to {}", path.display());
            copied
        }
        None => io::copy(&mut file, &mut io::stdout().lock())?,
    };
    file.close()?;

    tracing::debug!(key, bytes = copied, "fetched");
    Ok(())
}
