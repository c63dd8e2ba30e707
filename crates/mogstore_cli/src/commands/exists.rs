//! Exists command implementation.

use super::Storage;

/// Runs the exists command.
///
/// Prints `true` or `false`; a missing key is not an error.
pub fn run(storage: &Storage, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", storage.exists(key)?);
    Ok(())
}
