//! Specification shipped with the bridge.

use crate::error::{SpecError, SpecResult};
use std::path::Path;

/// Default tool specification, used when the remote endpoint cannot supply one
pub const BUNDLED_SPEC: &str = include_str!("../assets/tools.yaml");

/// Read a specification document from disk
///
/// # Errors
///
/// Returns error if the file cannot be read
pub fn read_spec_file(path: &Path) -> SpecResult<String> {
    std::fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Compiler;
    use crate::spec::ArgumentType;

    #[test]
    fn test_bundled_spec_is_a_list() {
        assert!(BUNDLED_SPEC.trim_start().starts_with('-'));
    }

    #[test]
    fn test_bundled_spec_compiles_cleanly() {
        let output = Compiler::new().compile(BUNDLED_SPEC).unwrap();
        assert!(output.warnings.is_empty(), "{:?}", output.warnings);
        assert!(output.registry.len() > 10);
        assert!(output.registry.contains("goto"));
        assert!(output.registry.contains("echo"));
    }

    #[test]
    fn test_bundled_region_types() {
        let registry = crate::compile(BUNDLED_SPEC).unwrap();
        let region = registry.get("region").unwrap();
        let kinds: Vec<_> = region.definition.arguments.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [
                ArgumentType::String,
                ArgumentType::Integer,
                ArgumentType::Integer,
                ArgumentType::String
            ]
        );
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_spec_file(Path::new("/nonexistent/igv/tools.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/igv/tools.yaml"));
    }
}
