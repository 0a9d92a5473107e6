//! IGV MCP Command Sessions
//!
//! Line-oriented command exchanges with the remote endpoint, one TCP
//! connection per command, and the startup fetch of the remote's tool
//! specification.
//!
//! Sessions never return errors. Failures are encoded in the response text,
//! which then starts with `"Error: "`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bootstrap;
pub mod exchange;
pub mod gate;
pub mod session;

pub use bootstrap::{bootstrap, is_spec_document, BootstrapOutcome, SpecSource, SPEC_COMMAND};
pub use exchange::{Exchange, Signal, EMPTY_RESPONSE, ERROR_PREFIX, TIMEOUT_RESPONSE};
pub use gate::CompletionGate;
pub use session::{CommandSender, CommandSession};
