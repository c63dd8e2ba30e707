//! CLI command implementations.

pub mod exists;
pub mod get;
pub mod put;
pub mod rm;
pub mod smoke;

use mogstore_client::{DirClient, DirConnector};
use mogstore_core::{MogileStorage, Settings};
use std::fs;
use std::path::Path;

/// Storage type every command operates on.
pub type Storage = MogileStorage<DirClient>;

/// Reads a JSON settings document.
pub fn read_settings(path: &Path) -> Result<Settings, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read settings file {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

/// Validates `settings` and opens a storage over the directory store at `root`.
pub fn open_storage(root: &Path, settings: Settings) -> Result<Storage, Box<dyn std::error::Error>> {
    let config = settings.into_config()?;
    Ok(MogileStorage::connect(config, &DirConnector::new(root))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn read_settings_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"MOGILE_TRACKERS": "127.0.0.1:7001", "MOGILE_DOMAIN": "cli"}"#,
        )
        .unwrap();

        let settings = read_settings(&path).unwrap();
        assert_eq!(settings.domain.as_deref(), Some("cli"));
    }

    #[test]
    fn read_settings_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_settings(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn open_storage_requires_settings() {
        let dir = tempdir().unwrap();
        let err = open_storage(dir.path(), Settings::default()).unwrap_err();
        assert!(err.to_string().contains("MOGILE_TRACKERS"));
    }

    #[test]
    fn open_storage_rejects_domain_outside_store() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("store");
        let settings = Settings {
            trackers: Some("127.0.0.1:7001".into()),
            domain: Some("../escaped".into()),
        };

        let err = open_storage(&root, settings).unwrap_err();
        assert!(err.to_string().contains("invalid domain"));
        assert!(!dir.path().join("escaped").exists());
    }
}
