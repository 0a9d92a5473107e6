//! igv-mcp
//!
//! MCP server over stdio for a running IGV instance. Logs go to stderr
//! because stdout carries the MCP transport.

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::{Context, Result};
use clap::Parser;
use igv_core::{BridgeConfig, FramingPolicy, RemoteTarget, DEFAULT_TIMEOUT_MS};
use igv_server::{load_registry, Bridge, IgvServerHandler};
use igv_session::CommandSession;
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "igv-mcp")]
#[command(about = "MCP server for IGV batch commands", long_about = None)]
#[command(version)]
struct Args {
    /// IGV host, optionally with a port (host:port)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// IGV batch port; overrides a port given in --host
    #[arg(short, long)]
    port: Option<u16>,

    /// Deadline for one command in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Response framing: line or first-chunk
    #[arg(long, default_value = "line")]
    framing: FramingPolicy,

    /// Tool specification used when IGV cannot supply one
    #[arg(long)]
    tools_file: Option<PathBuf>,

    /// Do not ask IGV for its tool specification
    #[arg(long)]
    no_fetch: bool,
}

impl Args {
    fn into_config(self) -> Result<BridgeConfig> {
        let mut target = RemoteTarget::parse(&self.host).context("Invalid --host")?;
        if let Some(port) = self.port {
            target = target.with_port(port);
        }

        let mut config = BridgeConfig::new(target)
            .with_timeout_ms(self.timeout_ms)
            .with_framing(self.framing)
            .with_fetch_spec(!self.no_fetch);
        if let Some(path) = self.tools_file {
            config = config.with_tools_file(path);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("igv_server=info,igv_session=info,igv_tool=info")),
        )
        .init();

    let config = args.into_config()?;
    tracing::info!(
        remote = %config.target,
        timeout_ms = config.timeout_ms,
        framing = %config.framing,
        "Starting IGV MCP server"
    );

    let session = Arc::new(CommandSession::from_config(&config));
    let loaded = load_registry(&config, session.clone())
        .await
        .context("Failed to load tool specification")?;

    let handler = IgvServerHandler::new(Bridge::new(loaded.registry, session));
    let service = handler
        .serve(stdio())
        .await
        .context("Failed to start MCP service")?;

    service.waiting().await?;
    tracing::info!("MCP client disconnected");

    Ok(())
}
