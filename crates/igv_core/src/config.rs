//! Bridge configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::target::RemoteTarget;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default per-command deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// When a command session treats the remote's response as complete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FramingPolicy {
    /// Resolve once the accumulated buffer ends with `\n`
    #[default]
    LineTerminated,
    /// Resolve on the first chunk of data, whatever it contains
    FirstChunk,
}

impl FramingPolicy {
    /// Short name used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineTerminated => "line",
            Self::FirstChunk => "first-chunk",
        }
    }
}

impl fmt::Display for FramingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FramingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" | "line-terminated" => Ok(Self::LineTerminated),
            "first-chunk" | "chunk" => Ok(Self::FirstChunk),
            other => Err(ConfigError::UnknownFraming(other.to_string())),
        }
    }
}

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Remote endpoint
    pub target: RemoteTarget,
    /// Deadline for one command, in milliseconds
    pub timeout_ms: u64,
    /// Response framing policy
    pub framing: FramingPolicy,
    /// Specification used when the remote one is unavailable (bundled default if unset)
    pub tools_file: Option<PathBuf>,
    /// Whether bootstrap asks the remote endpoint for its specification
    pub fetch_spec: bool,
}

impl BridgeConfig {
    /// Create a new config for a target
    #[must_use]
    pub fn new(target: RemoteTarget) -> Self {
        Self {
            target,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            framing: FramingPolicy::default(),
            tools_file: None,
            fetch_spec: true,
        }
    }

    /// Set command timeout
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set framing policy
    #[must_use]
    pub fn with_framing(mut self, framing: FramingPolicy) -> Self {
        self.framing = framing;
        self
    }

    /// Set fallback specification file
    #[must_use]
    pub fn with_tools_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tools_file = Some(path.into());
        self
    }

    /// Enable or disable the remote specification fetch
    #[must_use]
    pub fn with_fetch_spec(mut self, fetch: bool) -> Self {
        self.fetch_spec = fetch;
        self
    }

    /// Command timeout as a [`Duration`]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check the config is usable
    ///
    /// # Errors
    ///
    /// Returns error if the timeout is zero or the host is empty
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.target.host.is_empty() {
            return Err(ConfigError::InvalidHost(String::new()));
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(RemoteTarget::default())
    }
}
