//! Specification errors.

/// Result of specification parsing
pub type SpecResult<T> = Result<T, SpecError>;

/// Error from reading a specification document
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The document is not YAML
    #[error("Invalid specification document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The specification file could not be read
    #[error("Cannot read specification {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
