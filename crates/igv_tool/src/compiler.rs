//! Compiler from specification documents to a tool registry.

use crate::error::SpecResult;
use crate::registry::{CompiledTool, ToolRegistry};
use crate::spec::{parse_document, SpecEntry, ToolDefinition};
use indexmap::IndexSet;

/// Output from compiling a specification
#[derive(Debug, Clone)]
pub struct CompilerOutput {
    /// The compiled registry
    pub registry: ToolRegistry,
    /// Compilation warnings
    pub warnings: Vec<CompilerWarning>,
}

/// Compilation warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerWarning {
    /// List entry that is not a tool definition; it was skipped
    InvalidEntry { index: usize, reason: String },
    /// Later definition replaced an earlier one with the same name
    DuplicateTool { name: String },
    /// Argument name repeated within one tool
    DuplicateArgument { tool: String, argument: String },
}

impl std::fmt::Display for CompilerWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEntry { index, reason } => {
                write!(f, "Skipped tool entry {}: {}", index, reason)
            }
            Self::DuplicateTool { name } => {
                write!(f, "Tool '{}' defined more than once; later definition wins", name)
            }
            Self::DuplicateArgument { tool, argument } => {
                write!(f, "Tool '{}' repeats argument '{}'", tool, argument)
            }
        }
    }
}

/// Compiler for specification documents
///
/// Pure and deterministic: the same document always yields the same registry.
#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    /// Create a new compiler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compile a specification document.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not YAML. A document without a tool
    /// list compiles to an empty registry.
    pub fn compile(&self, document: &str) -> SpecResult<CompilerOutput> {
        let mut warnings = Vec::new();
        let definitions = parse_document(document)?
            .into_iter()
            .filter_map(|entry| match entry {
                SpecEntry::Tool(definition) => Some(definition),
                SpecEntry::Invalid { index, reason } => {
                    warnings.push(CompilerWarning::InvalidEntry { index, reason });
                    None
                }
            })
            .collect::<Vec<_>>();

        let mut output = self.compile_definitions(definitions);
        warnings.append(&mut output.warnings);
        output.warnings = warnings;
        Ok(output)
    }

    /// Compile already-parsed definitions
    #[must_use]
    pub fn compile_definitions(&self, definitions: Vec<ToolDefinition>) -> CompilerOutput {
        let mut registry = ToolRegistry::new();
        let mut warnings = Vec::new();

        for definition in definitions {
            Self::check_arguments(&definition, &mut warnings);
            let name = definition.name.clone();
            if registry.insert(CompiledTool::new(definition)).is_some() {
                warnings.push(CompilerWarning::DuplicateTool { name });
            }
        }

        CompilerOutput { registry, warnings }
    }

    fn check_arguments(definition: &ToolDefinition, warnings: &mut Vec<CompilerWarning>) {
        let mut seen = IndexSet::new();
        for argument in &definition.arguments {
            if !seen.insert(argument.name.as_str()) {
                warnings.push(CompilerWarning::DuplicateArgument {
                    tool: definition.name.clone(),
                    argument: argument.name.clone(),
                });
            }
        }
    }
}

/// Compile a specification document into a registry, logging any warnings.
///
/// # Errors
///
/// Returns error if the document is not YAML
pub fn compile(document: &str) -> SpecResult<ToolRegistry> {
    let output = Compiler::new().compile(document)?;
    for warning in &output.warnings {
        tracing::warn!("{}", warning);
    }
    Ok(output.registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JsonType;
    use serde_json::{json, Value};

    const DOC: &str = r#"
- name: load
  description: Load a file
  arguments:
    - name: file
      type: string
      description: Path or URL
    - name: index
      optional: true
- name: maxPanelHeight
  arguments:
    - name: height
      type: integer
- name: viewaspairs
  arguments:
    - name: enable
      optional: true
      enumValues:
        - value: "True"
        - value: "False"
"#;

    #[test]
    fn test_compile_empty() {
        let output = Compiler::new().compile("").unwrap();
        assert!(output.registry.is_empty());
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_compile_tools_key_missing() {
        let registry = compile("name: not-a-list\n").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_compile_document() {
        let registry = compile(DOC).unwrap();
        assert_eq!(registry.names(), ["load", "maxPanelHeight", "viewaspairs"]);

        let load = registry.get("load").unwrap();
        assert_eq!(load.description, "Load a file");
        assert_eq!(
            Value::Object(load.input_schema.to_json()),
            json!({
                "type": "object",
                "properties": {
                    "file": {"type": "string", "description": "Path or URL"},
                    "index": {"type": "string", "description": ""}
                },
                "required": ["file"]
            })
        );

        let height = &registry.get("maxPanelHeight").unwrap().input_schema.properties["height"];
        assert_eq!(height.kind, JsonType::Number);
    }

    #[test]
    fn test_compile_all_optional_omits_required() {
        let registry = compile(DOC).unwrap();
        let schema = registry.get("viewaspairs").unwrap().input_schema.to_json();
        assert!(!schema.contains_key("required"));
        assert_eq!(
            schema["properties"]["enable"]["enum"],
            json!(["True", "False"])
        );
    }

    #[test]
    fn test_compile_is_deterministic() {
        let first = compile(DOC).unwrap();
        let second = compile(DOC).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compile_duplicate_tool_warns_and_overwrites() {
        let doc = "- name: goto\n  description: first\n- name: goto\n  description: second\n";
        let output = Compiler::new().compile(doc).unwrap();
        assert_eq!(output.registry.len(), 1);
        assert_eq!(output.registry.get("goto").unwrap().description, "second");
        assert_eq!(
            output.warnings,
            vec![CompilerWarning::DuplicateTool {
                name: "goto".to_string()
            }]
        );
    }

    #[test]
    fn test_compile_skips_invalid_entries() {
        let doc = "- 42\n- name: echo\n";
        let output = Compiler::new().compile(doc).unwrap();
        assert_eq!(output.registry.names(), ["echo"]);
        assert!(matches!(
            output.warnings[0],
            CompilerWarning::InvalidEntry { index: 0, .. }
        ));
    }

    #[test]
    fn test_compile_duplicate_argument_warns() {
        let doc = "- name: t\n  arguments:\n    - name: a\n    - name: a\n";
        let output = Compiler::new().compile(doc).unwrap();
        assert_eq!(
            output.warnings,
            vec![CompilerWarning::DuplicateArgument {
                tool: "t".to_string(),
                argument: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_compile_invalid_yaml() {
        assert!(compile("- name: {").is_err());
    }
}
