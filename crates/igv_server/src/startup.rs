//! Registry construction at process start.

use igv_core::BridgeConfig;
use igv_session::{bootstrap, BootstrapOutcome, CommandSender, SpecSource};
use igv_tool::{compile, read_spec_file, SpecResult, ToolRegistry, BUNDLED_SPEC};
use std::borrow::Cow;
use std::sync::Arc;

/// A compiled registry and the origin of its specification
#[derive(Debug)]
pub struct LoadedRegistry {
    /// Compiled tools
    pub registry: ToolRegistry,
    /// Where the compiled document came from
    pub source: SpecSource,
}

/// The local specification document: the configured tools file, else the
/// bundled default.
///
/// # Errors
///
/// Returns error if the configured tools file cannot be read
pub fn fallback_document(config: &BridgeConfig) -> SpecResult<Cow<'static, str>> {
    match &config.tools_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using tools file as fallback specification");
            read_spec_file(path).map(Cow::Owned)
        }
        None => Ok(Cow::Borrowed(BUNDLED_SPEC)),
    }
}

/// Bootstrap the specification and compile it.
///
/// A fetched document that does not compile is discarded in favor of the
/// fallback.
///
/// # Errors
///
/// Returns error if the tools file cannot be read or the fallback document
/// is not valid YAML
pub async fn load_registry(
    config: &BridgeConfig,
    sender: Arc<dyn CommandSender>,
) -> SpecResult<LoadedRegistry> {
    let fallback = fallback_document(config)?;

    let outcome = if config.fetch_spec {
        bootstrap(sender, &fallback).await
    } else {
        tracing::info!("Remote specification fetch disabled");
        BootstrapOutcome::fallback(&fallback)
    };

    let loaded = match (compile(&outcome.document), outcome.source) {
        (Ok(registry), source) => LoadedRegistry { registry, source },
        (Err(err), SpecSource::Remote) => {
            tracing::warn!(error = %err, "Remote specification does not compile, using fallback");
            LoadedRegistry {
                registry: compile(&fallback)?,
                source: SpecSource::Fallback,
            }
        }
        (Err(err), SpecSource::Fallback) => return Err(err),
    };

    tracing::info!(
        tools = loaded.registry.len(),
        source = %loaded.source,
        "Tool registry ready"
    );
    Ok(loaded)
}
