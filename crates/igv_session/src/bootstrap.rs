//! Startup negotiation of the tool specification.
//!
//! The remote endpoint is asked once for its own specification. Anything
//! that does not look like a YAML list falls back to the local document.

use crate::session::CommandSender;
use std::sync::Arc;

/// Command that asks the remote endpoint for its tool specification
pub const SPEC_COMMAND: &str = "toolsYaml";

/// Where the specification document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecSource {
    /// Fetched from the remote endpoint
    Remote,
    /// Bundled default or configured file
    Fallback,
}

impl std::fmt::Display for SpecSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Result of the bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// Specification document text
    pub document: String,
    /// Origin of `document`
    pub source: SpecSource,
}

impl BootstrapOutcome {
    /// Outcome using the fallback document
    #[must_use]
    pub fn fallback(document: &str) -> Self {
        Self {
            document: document.to_string(),
            source: SpecSource::Fallback,
        }
    }
}

/// Whether a response is usable as a specification document
#[must_use]
pub fn is_spec_document(response: &str) -> bool {
    response.starts_with('-')
}

/// Fetch the remote specification, or fall back to `fallback`.
///
/// Runs once per process and is never retried. A sender that panics counts
/// as a failed fetch.
pub async fn bootstrap(sender: Arc<dyn CommandSender>, fallback: &str) -> BootstrapOutcome {
    tracing::info!("Fetching tool specification from remote endpoint");

    let fetch = tokio::spawn(async move { sender.send_command(SPEC_COMMAND).await });
    let response = match fetch.await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "Specification fetch failed, using fallback");
            return BootstrapOutcome::fallback(fallback);
        }
    };

    if is_spec_document(&response) {
        tracing::info!(chars = response.len(), "Using specification from remote endpoint");
        BootstrapOutcome {
            document: response,
            source: SpecSource::Remote,
        }
    } else {
        tracing::info!(response = %response, "No valid specification from remote endpoint, using fallback");
        BootstrapOutcome::fallback(fallback)
    }
}
