//! Response state of one command exchange.
//!
//! Every socket event is fed to [`Exchange::observe`] as a [`Signal`]. The
//! first signal that settles the exchange wins; later signals are ignored.

use crate::gate::CompletionGate;
use igv_core::FramingPolicy;

/// Response substituted for an empty reply
pub const EMPTY_RESPONSE: &str = "OK";

/// Response when the deadline elapses first
pub const TIMEOUT_RESPONSE: &str = "Error: Connection timeout";

/// Prefix of every failure response
pub const ERROR_PREFIX: &str = "Error: ";

/// An event on the session's connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<'a> {
    /// Bytes received from the remote
    Data(&'a [u8]),
    /// Remote closed its write side
    End,
    /// Transport failure with its message
    Error(String),
    /// Deadline elapsed
    Timeout,
    /// Connection closed; never settles the exchange
    Closed,
}

/// Accumulated state of one command's response
#[derive(Debug)]
pub struct Exchange {
    framing: FramingPolicy,
    buffer: Vec<u8>,
    gate: CompletionGate<String>,
}

impl Exchange {
    /// Create an exchange awaiting its response
    #[must_use]
    pub fn new(framing: FramingPolicy) -> Self {
        Self {
            framing,
            buffer: Vec::new(),
            gate: CompletionGate::new(),
        }
    }

    /// Feed a signal.
    ///
    /// Returns `true` only for the signal that settled the exchange.
    pub fn observe(&mut self, signal: Signal<'_>) -> bool {
        if self.gate.is_complete() {
            tracing::trace!(?signal, "Ignoring signal after resolution");
            return false;
        }

        match signal {
            Signal::Data(chunk) => {
                self.buffer.extend_from_slice(chunk);
                let framed = match self.framing {
                    FramingPolicy::FirstChunk => true,
                    FramingPolicy::LineTerminated => self.buffer.ends_with(b"\n"),
                };
                framed && self.settle_with_buffer()
            }
            Signal::End => self.settle_with_buffer(),
            Signal::Error(message) => self.gate.complete(format!("{}{}", ERROR_PREFIX, message)),
            Signal::Timeout => self.gate.complete(TIMEOUT_RESPONSE.to_string()),
            Signal::Closed => false,
        }
    }

    /// Whether the exchange has settled
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.gate.is_complete()
    }

    /// The settled response, if any
    #[must_use]
    pub fn response(&self) -> Option<&str> {
        self.gate.get().map(String::as_str)
    }

    /// Bytes received so far
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Finish the exchange; an unsettled exchange settles as if the stream ended
    #[must_use]
    pub fn into_response(mut self) -> String {
        self.observe(Signal::End);
        self.gate.into_inner().unwrap_or_default()
    }

    fn settle_with_buffer(&self) -> bool {
        let text = String::from_utf8_lossy(&self.buffer);
        let trimmed = text.trim();
        let response = if trimmed.is_empty() {
            EMPTY_RESPONSE
        } else {
            trimmed
        };
        self.gate.complete(response.to_string())
    }
}
