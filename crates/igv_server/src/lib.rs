//! IGV MCP Server
//!
//! Exposes the compiled IGV tool registry to MCP clients over stdio and
//! forwards tool calls to a running IGV instance.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod startup;

pub use dispatch::{Bridge, BridgeReply, BridgeRequest, ToolDescriptor};
pub use error::CallError;
pub use handler::{IgvServerHandler, SERVER_NAME};
pub use startup::{fallback_document, load_registry, LoadedRegistry};
