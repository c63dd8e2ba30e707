//! Rm command implementation.

use super::Storage;

/// Runs the rm command.
pub fn run(storage: &Storage, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !storage.exists(key)? {
        println!("{key:?} not stored; nothing to delete");
        return Ok(());
    }
    storage.delete(key)?;
    println!("Deleted {key:?}");
    Ok(())
}
