//! Address of the remote endpoint.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default host of the remote endpoint
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default IGV batch command port
pub const DEFAULT_PORT: u16 = 60151;

/// Host and port of the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteTarget {
    /// Host name or IP address
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl RemoteTarget {
    /// Create a new target
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host` or `host:port`.
    ///
    /// A bare host gets [`DEFAULT_PORT`].
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the port is not a valid TCP port
    pub fn parse(input: &str) -> ConfigResult<Self> {
        let input = input.trim();
        let (host, port) = match input.rsplit_once(':') {
            // Bracketless IPv6 literals have more than one colon; treat them as a bare host.
            Some((host, _)) if host.contains(':') && !host.ends_with(']') => (input, None),
            Some((host, port)) => (host, Some(port)),
            None => (input, None),
        };

        if host.is_empty() {
            return Err(ConfigError::InvalidHost(input.to_string()));
        }

        let port = match port {
            Some(raw) => parse_port(raw)?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(host.trim_start_matches('[').trim_end_matches(']'), port))
    }

    /// Replace the port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl Default for RemoteTarget {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn parse_port(raw: &str) -> ConfigResult<u16> {
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidPort(raw.to_string())),
        Ok(port) => Ok(port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        let target = RemoteTarget::default();
        assert_eq!(target.host, "127.0.0.1");
        assert_eq!(target.port, 60151);
        assert_eq!(target.to_string(), "127.0.0.1:60151");
    }

    #[test]
    fn test_parse_host_only() {
        let target = RemoteTarget::parse("localhost").unwrap();
        assert_eq!(target, RemoteTarget::new("localhost", DEFAULT_PORT));
    }

    #[test]
    fn test_parse_host_and_port() {
        let target = RemoteTarget::parse("igv.local:60152").unwrap();
        assert_eq!(target.host, "igv.local");
        assert_eq!(target.port, 60152);
    }

    #[test]
    fn test_parse_bracketed_ipv6() {
        let target = RemoteTarget::parse("[::1]:6000").unwrap();
        assert_eq!(target.host, "::1");
        assert_eq!(target.port, 6000);
        assert_eq!(target.to_string(), "[::1]:6000");
    }

    #[test]
    fn test_parse_bare_ipv6() {
        let target = RemoteTarget::parse("::1").unwrap();
        assert_eq!(target.host, "::1");
        assert_eq!(target.port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_invalid_port() {
        assert_eq!(
            RemoteTarget::parse("localhost:igv"),
            Err(ConfigError::InvalidPort("igv".to_string()))
        );
        assert!(RemoteTarget::parse("localhost:0").is_err());
        assert!(RemoteTarget::parse("localhost:70000").is_err());
    }

    #[test]
    fn test_parse_empty_host() {
        assert!(matches!(
            RemoteTarget::parse(":60151"),
            Err(ConfigError::InvalidHost(_))
        ));
        assert!(RemoteTarget::parse("").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_display_parse_roundtrip(host in "[a-z][a-z0-9.-]{0,20}", port in 1u16..=u16::MAX) {
            let target = RemoteTarget::new(host, port);
            let parsed = RemoteTarget::parse(&target.to_string()).unwrap();
            proptest::prop_assert_eq!(parsed, target);
        }
    }
}
