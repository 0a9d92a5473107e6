//! IGV MCP Core Types
//!
//! This crate contains pure types with no I/O: where the remote endpoint
//! lives, how its responses are framed, and how long a command may take.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod target;

// Re-exports
pub use config::{BridgeConfig, FramingPolicy, DEFAULT_TIMEOUT_MS};
pub use error::{ConfigError, ConfigResult};
pub use target::{RemoteTarget, DEFAULT_HOST, DEFAULT_PORT};
