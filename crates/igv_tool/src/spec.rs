//! Tool specification documents.
//!
//! A specification is YAML: either a bare list of tool definitions or a map
//! whose `tools` key holds that list. Anything else is an empty specification.

use crate::error::SpecResult;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Declared type of a tool argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// Whole number
    Integer,
    /// true / false
    Boolean,
    /// Free text; also the fallback for unrecognized type names
    #[default]
    #[serde(other)]
    String,
}

/// One permitted value of an enumerated argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value as written in the specification
    #[serde(deserialize_with = "scalar_string")]
    pub value: String,
    /// Display metadata (labels, descriptions) carried through untouched
    #[serde(flatten)]
    pub metadata: IndexMap<String, Value>,
}

impl EnumValue {
    /// Create an enum value without metadata
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            metadata: IndexMap::new(),
        }
    }
}

/// Argument of a tool, in wire order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDefinition {
    /// Argument name, unique within its tool
    pub name: String,
    /// Declared type
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ArgumentType,
    /// Whether the argument may be left out
    #[serde(default, deserialize_with = "null_as_default")]
    pub optional: bool,
    /// Human readable description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Permitted values; presence makes the value a bare token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValue>>,
}

impl ArgumentDefinition {
    /// Create a required string argument
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ArgumentType::String,
            optional: false,
            description: String::new(),
            enum_values: None,
        }
    }

    /// Set the declared type
    #[must_use]
    pub fn with_kind(mut self, kind: ArgumentType) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as optional
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restrict to a set of values
    #[must_use]
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(EnumValue::new).collect());
        self
    }

    /// Whether the argument carries enumerated values
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }
}

/// A tool as written in the specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name; also the command verb on the wire
    pub name: String,
    /// Human readable description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Arguments in wire order
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: Vec<ArgumentDefinition>,
}

impl ToolDefinition {
    /// Create a tool without arguments
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            arguments: Vec::new(),
        }
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an argument
    #[must_use]
    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Entry of a specification document, decoded or not
#[derive(Debug, Clone, PartialEq)]
pub enum SpecEntry {
    /// Entry decoded into a definition
    Tool(ToolDefinition),
    /// Entry that is not a valid tool definition
    Invalid {
        /// Position in the tool list
        index: usize,
        /// Decoder message
        reason: String,
    },
}

/// Parse a specification document into its tool list entries.
///
/// # Errors
///
/// Returns error if the text is not YAML at all
pub fn parse_document(text: &str) -> SpecResult<Vec<SpecEntry>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let root: Value = serde_yaml::from_str(text)?;
    let list = match root {
        Value::Sequence(list) => list,
        Value::Mapping(mut map) => match map.remove("tools") {
            Some(Value::Sequence(list)) => list,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    Ok(list
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match serde_yaml::from_value(entry) {
            Ok(tool) => SpecEntry::Tool(tool),
            Err(err) => SpecEntry::Invalid {
                index,
                reason: err.to_string(),
            },
        })
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Enum values may be authored unquoted (`value: 1`, `value: true`).
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "enum value must be a scalar, got {:?}",
            other
        ))),
    }
}
