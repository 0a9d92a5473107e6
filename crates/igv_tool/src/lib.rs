//! IGV MCP Tool System
//!
//! Turns a declarative YAML tool specification into compiled tools with
//! input schemas, and turns tool calls back into remote command lines.
//! Nothing in this crate performs network I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundled;
pub mod codec;
pub mod compiler;
pub mod error;
pub mod registry;
pub mod schema;
pub mod spec;
pub mod validate;

pub use bundled::{read_spec_file, BUNDLED_SPEC};
pub use codec::{build_command, coerce_to_string};
pub use compiler::{compile, Compiler, CompilerOutput, CompilerWarning};
pub use error::{SpecError, SpecResult};
pub use registry::{CompiledTool, ToolRegistry};
pub use schema::{InputSchema, JsonType, PropertySchema};
pub use spec::{ArgumentDefinition, ArgumentType, EnumValue, ToolDefinition};
pub use validate::{validate_arguments, ValidationError};
