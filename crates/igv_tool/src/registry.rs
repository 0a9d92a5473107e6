//! Registry of compiled tools.

use crate::schema::InputSchema;
use crate::spec::ToolDefinition;
use indexmap::IndexMap;

/// A tool definition together with its derived input schema
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTool {
    /// Tool name
    pub name: String,
    /// Tool description (empty when the specification has none)
    pub description: String,
    /// Schema of the argument bag
    pub input_schema: InputSchema,
    /// The definition the schema was derived from; command building needs
    /// its argument order and enum markers
    pub definition: ToolDefinition,
}

impl CompiledTool {
    /// Compile a single definition
    #[must_use]
    pub fn new(definition: ToolDefinition) -> Self {
        let input_schema = definition.arguments.iter().collect();
        Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            input_schema,
            definition,
        }
    }
}

/// Compiled tools by name, in specification order
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolRegistry {
    tools: IndexMap<String, CompiledTool>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Insert a tool.
    ///
    /// A tool with the same name is replaced and returned; the name keeps the
    /// position of its first insertion.
    pub fn insert(&mut self, tool: CompiledTool) -> Option<CompiledTool> {
        self.tools.insert(tool.name.clone(), tool)
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CompiledTool> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tools in specification order
    pub fn iter(&self) -> impl Iterator<Item = &CompiledTool> {
        self.tools.values()
    }

    /// Tool names in specification order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Get the count of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl FromIterator<CompiledTool> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = CompiledTool>>(iter: I) -> Self {
        let mut registry = Self::new();
        for tool in iter {
            registry.insert(tool);
        }
        registry
    }
}
