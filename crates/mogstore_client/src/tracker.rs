//! Tracker endpoint parsing.

use crate::error::{ClientError, ClientResult};
use std::fmt;
use std::str::FromStr;

/// Port trackers listen on when an endpoint omits one.
pub const DEFAULT_TRACKER_PORT: u16 = 7001;

/// A tracker endpoint (`host:port`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackerAddr {
    host: String,
    port: u16,
}

impl TrackerAddr {
    /// Creates a tracker address from parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is empty or contains whitespace, or the
    /// port is zero.
    pub fn new(host: impl Into<String>, port: u16) -> ClientResult<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(ClientError::invalid_endpoint(
                format!(":{port}"),
                "host is empty",
            ));
        }
        if host.chars().any(char::is_whitespace) {
            return Err(ClientError::invalid_endpoint(
                format!("{host}:{port}"),
                "host contains whitespace",
            ));
        }
        if port == 0 {
            return Err(ClientError::invalid_endpoint(
                format!("{host}:{port}"),
                "port must be non-zero",
            ));
        }
        Ok(Self { host, port })
    }

    /// Returns the host part.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port part.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for TrackerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for TrackerAddr {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let endpoint = s.trim();
        let (host, port) = match endpoint.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| {
                    ClientError::invalid_endpoint(endpoint, "port is not a number")
                })?;
                (host, port)
            }
            None => (endpoint, DEFAULT_TRACKER_PORT),
        };
        Self::new(host, port).map_err(|e| match e {
            ClientError::InvalidEndpoint { reason, .. } => {
                ClientError::invalid_endpoint(endpoint, reason)
            }
            other => other,
        })
    }
}

/// Parses a tracker list delimited by commas or slashes.
///
/// Surrounding whitespace is ignored and empty entries are skipped, so
/// `"a:7001, b:7001,"` yields two trackers. An input with no entries yields
/// an empty list; callers decide whether that is acceptable.
///
/// # Errors
///
/// Returns an error for the first malformed endpoint.
pub fn parse_tracker_list(list: &str) -> ClientResult<Vec<TrackerAddr>> {
    list.split([',', '/'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse::<TrackerAddr>)
        .collect()
}
