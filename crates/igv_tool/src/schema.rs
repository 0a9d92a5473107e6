//! Input schemas advertised for compiled tools.

use crate::spec::{ArgumentDefinition, ArgumentType};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::{Map, Value};

/// JSON type of a schema property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// JSON string
    String,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
}

impl From<ArgumentType> for JsonType {
    fn from(kind: ArgumentType) -> Self {
        match kind {
            ArgumentType::Integer => Self::Number,
            ArgumentType::Boolean => Self::Boolean,
            ArgumentType::String => Self::String,
        }
    }
}

/// Schema of one argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySchema {
    /// JSON type
    #[serde(rename = "type")]
    pub kind: JsonType,
    /// Description shown to callers
    pub description: String,
    /// Permitted values, in specification order
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    /// Derive the schema of an argument definition
    #[must_use]
    pub fn from_argument(argument: &ArgumentDefinition) -> Self {
        Self {
            kind: argument.kind.into(),
            description: argument.description.clone(),
            // Attached whatever the declared type; only string arguments use it in practice.
            enum_values: argument
                .enum_values
                .as_ref()
                .map(|values| values.iter().map(|v| v.value.clone()).collect()),
        }
    }
}

/// Object schema for a tool's argument bag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSchema {
    /// Always `"object"`
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Argument schemas by name, in specification order
    pub properties: IndexMap<String, PropertySchema>,
    /// Names of required arguments; omitted from the JSON form when empty
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub required: IndexSet<String>,
}

impl InputSchema {
    /// Create an empty object schema
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: "object",
            properties: IndexMap::new(),
            required: IndexSet::new(),
        }
    }

    /// Add an argument; a repeated name replaces the earlier property
    pub fn add_argument(&mut self, argument: &ArgumentDefinition) {
        self.properties
            .insert(argument.name.clone(), PropertySchema::from_argument(argument));
        if !argument.optional {
            self.required.insert(argument.name.clone());
        }
    }

    /// Whether an argument must be supplied
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// JSON object form of the schema
    #[must_use]
    pub fn to_json(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a ArgumentDefinition> for InputSchema {
    fn from_iter<I: IntoIterator<Item = &'a ArgumentDefinition>>(iter: I) -> Self {
        let mut schema = Self::new();
        for argument in iter {
            schema.add_argument(argument);
        }
        schema
    }
}
