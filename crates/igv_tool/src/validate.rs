//! Argument validation against a compiled tool's input schema.

use crate::registry::CompiledTool;
use serde_json::{Map, Value};

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required argument is absent or null
    #[error("Missing required argument '{argument}'")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

/// Check that every required argument has a non-null value.
///
/// Types and enum membership are left to the remote endpoint, which reports
/// its own errors.
///
/// # Errors
///
/// Returns the first required argument, in definition order, that is missing
pub fn validate_arguments(
    tool: &CompiledTool,
    arguments: &Map<String, Value>,
) -> Result<(), ValidationError> {
    for name in &tool.input_schema.required {
        match arguments.get(name) {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingArgument {
                    argument: name.clone(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
