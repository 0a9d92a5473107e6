//! Tool call errors

use igv_tool::ValidationError;
use thiserror::Error;

/// Why a tool call produced an error-flagged result.
///
/// Transport failures are not represented here: the remote's `"Error: ..."`
/// text is a successful call result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// No tool with this name in the registry
    #[error("Tool '{name}' not found")]
    NotFound {
        /// Requested name
        name: String,
    },

    /// Arguments rejected before a command was built
    #[error("Error executing tool '{tool}': {source}")]
    InvalidArguments {
        /// Tool name
        tool: String,
        /// Validation failure
        #[source]
        source: ValidationError,
    },

    /// The call handler failed while sending
    #[error("Error executing tool '{tool}': {message}")]
    Failed {
        /// Tool name
        tool: String,
        /// Failure message
        message: String,
    },
}

impl CallError {
    /// Name of the tool the call referred to
    #[must_use]
    pub fn tool(&self) -> &str {
        match self {
            Self::NotFound { name } => name,
            Self::InvalidArguments { tool, .. } | Self::Failed { tool, .. } => tool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CallError::NotFound {
            name: "zoomIn".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'zoomIn' not found");
        assert_eq!(err.tool(), "zoomIn");
    }

    #[test]
    fn test_invalid_arguments_message() {
        let err = CallError::InvalidArguments {
            tool: "goto".to_string(),
            source: ValidationError::MissingArgument {
                argument: "locus".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Error executing tool 'goto': Missing required argument 'locus'"
        );
    }

    #[test]
    fn test_failed_message() {
        let err = CallError::Failed {
            tool: "snapshot".to_string(),
            message: "task panicked".to_string(),
        };
        assert_eq!(err.to_string(), "Error executing tool 'snapshot': task panicked");
        assert_eq!(err.tool(), "snapshot");
    }
}
