//! Command sessions against the remote endpoint.
//!
//! Each command gets its own TCP connection: connect, write the command line,
//! wait for the response, close. The exchange resolves exactly once, on the
//! first of framed data, stream end, transport error, or deadline.

use crate::exchange::{Exchange, Signal};
use async_trait::async_trait;
use igv_core::{BridgeConfig, FramingPolicy, RemoteTarget, DEFAULT_TIMEOUT_MS};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;

const READ_CHUNK: usize = 8 * 1024;

/// Anything that can deliver a command line and return the remote's reply.
///
/// Implementations never fail: transport problems come back as text
/// starting with `"Error: "`.
#[async_trait]
pub trait CommandSender: Send + Sync {
    /// Send one command and wait for its response
    async fn send_command(&self, command: &str) -> String;
}

/// Connection parameters for command exchanges with one remote endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSession {
    target: RemoteTarget,
    timeout: Duration,
    framing: FramingPolicy,
}

impl CommandSession {
    /// Create a session for a target with default timeout and framing
    #[must_use]
    pub fn new(target: RemoteTarget) -> Self {
        Self {
            target,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            framing: FramingPolicy::default(),
        }
    }

    /// Create a session from bridge configuration
    #[must_use]
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.target.clone())
            .with_timeout(config.timeout())
            .with_framing(config.framing)
    }

    /// Set the per-command deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the framing policy
    #[must_use]
    pub fn with_framing(mut self, framing: FramingPolicy) -> Self {
        self.framing = framing;
        self
    }

    /// Remote endpoint
    #[must_use]
    pub fn target(&self) -> &RemoteTarget {
        &self.target
    }

    /// Per-command deadline
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Framing policy
    #[must_use]
    pub fn framing(&self) -> FramingPolicy {
        self.framing
    }

    /// Send one command over a fresh connection.
    ///
    /// The deadline is fixed before the connection attempt starts and covers
    /// connecting, writing and reading.
    pub async fn send(&self, command: &str) -> String {
        let mut exchange = Exchange::new(self.framing);
        let deadline = Instant::now() + self.timeout;

        let finished = tokio::time::timeout_at(deadline, self.run(command, &mut exchange))
            .await
            .is_ok();
        if !finished {
            tracing::warn!(remote = %self.target, command, "Command timed out");
            exchange.observe(Signal::Timeout);
        }

        exchange.observe(Signal::Closed);
        tracing::debug!(remote = %self.target, "Connection closed");
        exchange.into_response()
    }

    async fn run(&self, command: &str, exchange: &mut Exchange) {
        let address = (self.target.host.as_str(), self.target.port);
        let mut stream = match TcpStream::connect(address).await {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!(remote = %self.target, error = %err, "Connect failed");
                exchange.observe(Signal::Error(err.to_string()));
                return;
            }
        };
        tracing::debug!(remote = %self.target, "Connected");

        let line = format!("{}\n", command);
        if let Err(err) = stream.write_all(line.as_bytes()).await {
            tracing::warn!(error = %err, "Write failed");
            exchange.observe(Signal::Error(err.to_string()));
            return;
        }
        tracing::debug!(command, "Sent command");

        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) => {
                    tracing::debug!("Connection ended by remote");
                    exchange.observe(Signal::End);
                    return;
                }
                Ok(n) => {
                    tracing::trace!(bytes = n, "Received data");
                    if exchange.observe(Signal::Data(&chunk[..n])) {
                        return;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Read failed");
                    exchange.observe(Signal::Error(err.to_string()));
                    return;
                }
            }
        }
    }
}

#[async_trait]
impl CommandSender for CommandSession {
    async fn send_command(&self, command: &str) -> String {
        self.send(command).await
    }
}
