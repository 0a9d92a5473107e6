//! Command codec: argument bag to wire command line.
//!
//! The remote protocol is positional and whitespace-delimited with no quoting
//! or escaping. Values containing spaces are sent as-is and will be split by
//! the remote; keeping them to single tokens is the caller's responsibility.

use crate::spec::{ArgumentDefinition, ToolDefinition};
use serde_json::{Map, Value};

/// Build the command line for a tool call.
///
/// Tokens follow the definition's argument order, never the order of keys in
/// `arguments`. Absent or `null` values contribute no token; required-ness is
/// not checked here.
#[must_use]
pub fn build_command(tool: &ToolDefinition, arguments: &Map<String, Value>) -> String {
    let mut parts = vec![tool.name.clone()];

    for argument in &tool.arguments {
        match arguments.get(&argument.name) {
            None | Some(Value::Null) => continue,
            Some(value) => parts.push(encode_argument(argument, value)),
        }
    }

    parts.join(" ")
}

/// Encode one argument value as a wire token
#[must_use]
pub fn encode_argument(argument: &ArgumentDefinition, value: &Value) -> String {
    let token = coerce_to_string(value);
    if argument.is_enum() {
        // Specifications spell boolean enums "True"/"False"; the remote wants lowercase.
        match token.as_str() {
            "True" => return "true".to_string(),
            "False" => return "false".to_string(),
            _ => {}
        }
    }
    token
}

/// Default string coercion of a JSON value.
///
/// Integral floats drop their fraction (`2.0` becomes `2`, `-0.0` becomes
/// `0`), magnitudes from `1e21` up use a signed exponent (`1e+21`), arrays
/// join their elements with commas, objects become `[object Object]`.
#[must_use]
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) if f == 0.0 => "0".to_string(),
            (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            (_, _, Some(f)) if f.abs() >= 1e21 => format!("{:e}", f).replacen('e', "e+", 1),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
