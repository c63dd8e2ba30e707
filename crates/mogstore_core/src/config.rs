//! Storage configuration.

use crate::error::{StorageError, StorageResult};
use mogstore_client::{parse_tracker_list, TrackerAddr};
use serde::{Deserialize, Serialize};

/// What a handle does with its buffer after a successful flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Drop the buffer; the next read fetches the blob again.
    ///
    /// Never serves content that another writer may have replaced.
    #[default]
    Refetch,
    /// Keep the flushed buffer as the cached content.
    ///
    /// Saves a round trip but assumes a single writer per key.
    KeepCache,
}

/// Configuration for a storage adapter.
///
/// Holds the domain and the ordered tracker list. Both must be non-empty;
/// [`StorageConfig::new`] enforces this and the adapter checks again when
/// it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    domain: String,
    trackers: Vec<TrackerAddr>,
    flush_policy: FlushPolicy,
}

impl StorageConfig {
    /// Creates a configuration for `domain` served by `trackers`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the domain is blank or the
    /// tracker list is empty.
    pub fn new(domain: impl Into<String>, trackers: Vec<TrackerAddr>) -> StorageResult<Self> {
        let config = Self {
            domain: domain.into(),
            trackers,
            flush_policy: FlushPolicy::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration from a comma or slash delimited tracker list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if an endpoint is malformed,
    /// the list is empty, or the domain is blank.
    pub fn parse(domain: impl Into<String>, trackers: &str) -> StorageResult<Self> {
        let trackers = parse_tracker_list(trackers)
            .map_err(|e| StorageError::configuration(e.to_string()))?;
        Self::new(domain, trackers)
    }

    /// Sets the flush policy.
    #[must_use]
    pub fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.flush_policy = policy;
        self
    }

    /// Checks that the domain and tracker list are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] describing the first problem.
    pub fn validate(&self) -> StorageResult<()> {
        if self.domain.trim().is_empty() {
            return Err(StorageError::configuration("domain must not be empty"));
        }
        if self.trackers.is_empty() {
            return Err(StorageError::configuration(
                "at least one tracker endpoint is required",
            ));
        }
        Ok(())
    }

    /// Returns the domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the trackers in configured order.
    #[must_use]
    pub fn trackers(&self) -> &[TrackerAddr] {
        &self.trackers
    }

    /// Returns the configured flush policy.
    #[must_use]
    pub fn flush_policy(&self) -> FlushPolicy {
        self.flush_policy
    }
}

/// Raw settings as supplied by the host application.
///
/// Field names match the setting names, so a JSON document such as
/// `{"MOGILE_TRACKERS": "10.0.0.1:7001", "MOGILE_DOMAIN": "media"}`
/// deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Tracker endpoints, delimited by commas or slashes.
    #[serde(rename = "MOGILE_TRACKERS", default)]
    pub trackers: Option<String>,

    /// Domain name.
    #[serde(rename = "MOGILE_DOMAIN", default)]
    pub domain: Option<String>,
}

impl Settings {
    /// Name of the tracker list setting.
    pub const TRACKERS: &'static str = "MOGILE_TRACKERS";

    /// Name of the domain setting.
    pub const DOMAIN: &'static str = "MOGILE_DOMAIN";

    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a setting name to a value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            trackers: lookup(Self::TRACKERS),
            domain: lookup(Self::DOMAIN),
        }
    }

    /// Fills unset fields from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Settings) -> Self {
        Self {
            trackers: self.trackers.or(fallback.trackers),
            domain: self.domain.or(fallback.domain),
        }
    }

    /// Validates the settings and builds a [`StorageConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] naming the missing setting,
    /// or describing the malformed one.
    pub fn into_config(self) -> StorageResult<StorageConfig> {
        let trackers = self.trackers.ok_or_else(|| missing(Self::TRACKERS))?;
        let domain = self.domain.ok_or_else(|| missing(Self::DOMAIN))?;
        StorageConfig::parse(domain, &trackers)
    }
}

impl TryFrom<Settings> for StorageConfig {
    type Error = StorageError;

    fn try_from(settings: Settings) -> StorageResult<Self> {
        settings.into_config()
    }
}

fn missing(setting: &str) -> StorageError {
    StorageError::configuration(format!(
        "the setting {setting} must be set to use MogileStorage"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tracker(s: &str) -> TrackerAddr {
        s.parse().unwrap()
    }

    #[test]
    fn new_config() {
        let config = StorageConfig::new("media", vec![tracker("10.0.0.1:7001")]).unwrap();
        assert_eq!(config.domain(), "media");
        assert_eq!(config.trackers().len(), 1);
        assert_eq!(config.flush_policy(), FlushPolicy::Refetch);
    }

    #[test]
    fn empty_domain_rejected() {
        let result = StorageConfig::new("  ", vec![tracker("a:7001")]);
        assert!(matches!(result, Err(StorageError::Configuration { .. })));
    }

    #[test]
    fn empty_trackers_rejected() {
        let result = StorageConfig::new("media", Vec::new());
        assert!(matches!(result, Err(StorageError::Configuration { .. })));

        let result = StorageConfig::parse("media", " , ");
        assert!(matches!(result, Err(StorageError::Configuration { .. })));
    }

    #[test]
    fn malformed_tracker_rejected() {
        let result = StorageConfig::parse("media", "a:7001,b:port");
        match result {
            Err(StorageError::Configuration { message }) => assert!(message.contains("b:port")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn parse_keeps_tracker_order() {
        let config = StorageConfig::parse("media", "b:7001/a:7001").unwrap();
        let hosts: Vec<&str> = config.trackers().iter().map(TrackerAddr::host).collect();
        assert_eq!(hosts, ["b", "a"]);
    }

    #[test]
    fn builder_pattern() {
        let config = StorageConfig::parse("media", "a:7001")
            .unwrap()
            .with_flush_policy(FlushPolicy::KeepCache);
        assert_eq!(config.flush_policy(), FlushPolicy::KeepCache);
    }

    #[test]
    fn settings_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("MOGILE_TRACKERS", "10.0.0.1:7001,10.0.0.2:7001"),
            ("MOGILE_DOMAIN", "media"),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        let config = settings.into_config().unwrap();
        assert_eq!(config.domain(), "media");
        assert_eq!(config.trackers().len(), 2);
    }

    #[test]
    fn settings_missing_trackers() {
        let settings = Settings {
            trackers: None,
            domain: Some("media".into()),
        };
        match StorageConfig::try_from(settings) {
            Err(StorageError::Configuration { message }) => {
                assert!(message.contains("MOGILE_TRACKERS"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn settings_missing_domain() {
        let settings = Settings {
            trackers: Some("a:7001".into()),
            domain: None,
        };
        match settings.into_config() {
            Err(StorageError::Configuration { message }) => {
                assert!(message.contains("MOGILE_DOMAIN"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn settings_or_fills_gaps() {
        let flags = Settings {
            trackers: None,
            domain: Some("flags".into()),
        };
        let env = Settings {
            trackers: Some("a:7001".into()),
            domain: Some("env".into()),
        };
        let merged = flags.or(env);
        assert_eq!(merged.domain.as_deref(), Some("flags"));
        assert_eq!(merged.trackers.as_deref(), Some("a:7001"));
    }

    #[test]
    fn settings_deserialize_json() {
        let json = r#"{"MOGILE_TRACKERS": "a:7001/b:7001", "MOGILE_DOMAIN": "media"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.domain.as_deref(), Some("media"));

        let config = settings.into_config().unwrap();
        assert_eq!(config.trackers().len(), 2);
    }

    #[test]
    fn settings_deserialize_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{"MOGILE_DOMAIN": "media"}"#).unwrap();
        assert!(settings.trackers.is_none());
        assert!(settings.into_config().is_err());
    }
}
