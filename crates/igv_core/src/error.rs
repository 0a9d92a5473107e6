//! Core error types for the bridge.

/// Core result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Host part of a target is empty
    #[error("Invalid host: {0:?}")]
    InvalidHost(String),

    /// Port is not a number in 1..=65535
    #[error("Invalid port: {0:?}")]
    InvalidPort(String),

    /// Timeout of zero would fail every command
    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    /// Unknown framing policy name
    #[error("Unknown framing policy: {0:?} (expected \"line\" or \"first-chunk\")")]
    UnknownFraming(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidPort("abc".to_string());
        assert_eq!(err.to_string(), "Invalid port: \"abc\"");

        let err = ConfigError::ZeroTimeout;
        assert_eq!(err.to_string(), "Timeout must be greater than zero");
    }

    #[test]
    fn test_error_equality() {
        let err1 = ConfigError::InvalidHost(String::new());
        let err2 = ConfigError::InvalidHost(String::new());
        assert_eq!(err1, err2);
        assert_ne!(err1, ConfigError::ZeroTimeout);
    }
}
