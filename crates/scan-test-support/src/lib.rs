//! A scriptable mock [`Transport`] used by every crate's integration
//! tests. Not shipped to device hardware, not part of the protocol core.

use std::collections::VecDeque;

use scan_core::RawFrame;
use scan_transport::{Transport, TransportError};

/// Replays a scripted sequence of replies and records every frame sent to
/// it, so tests can assert both "what the dispatcher received" and "what
/// the dispatcher transmitted, verbatim, across retries".
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<RawFrame>,
    default_reply: RawFrame,
    sent: Vec<RawFrame>,
    fail_on_call: Option<(usize, String)>,
    calls: usize,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one reply; replies are returned in FIFO order, one per
    /// `exchange` call.
    pub fn push_reply(&mut self, reply: RawFrame) -> &mut Self {
        self.replies.push_back(reply);
        self
    }

    /// Reply returned once the queued replies are exhausted.
    pub fn set_default_reply(&mut self, reply: RawFrame) -> &mut Self {
        self.default_reply = reply;
        self
    }

    /// Make the `n`th call (1-indexed) fail with an I/O error, to exercise
    /// driver-failure paths.
    pub fn fail_on_call(&mut self, n: usize, message: impl Into<String>) -> &mut Self {
        self.fail_on_call = Some((n, message.into()));
        self
    }

    /// Every frame sent so far, in call order.
    #[must_use]
    pub fn sent_frames(&self) -> &[RawFrame] {
        &self.sent
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls
    }
}

#[derive(Debug)]
struct ScriptedIoError(String);

impl std::fmt::Display for ScriptedIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ScriptedIoError {}

impl Transport for ScriptedTransport {
    fn exchange(&mut self, out: RawFrame) -> Result<RawFrame, TransportError> {
        self.calls += 1;
        self.sent.push(out);

        if let Some((n, message)) = &self.fail_on_call {
            if *n == self.calls {
                return Err(TransportError::io(ScriptedIoError(message.clone())));
            }
        }

        Ok(self.replies.pop_front().unwrap_or(self.default_reply))
    }
}

/// Build a reply's raw bytes from a status byte and a word, as a device
/// would send it back.
#[must_use]
pub fn reply_bytes(status: u8, word: u64) -> RawFrame {
    let mut bytes = [0u8; 9];
    bytes[0] = status;
    bytes[1..].copy_from_slice(&word.to_be_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_queued_replies_in_order_then_the_default() {
        let mut transport = ScriptedTransport::new();
        transport
            .push_reply(reply_bytes(0x04, 0))
            .push_reply(reply_bytes(0x04, 0))
            .set_default_reply(reply_bytes(0, 0));

        let frame = [0u8; 9];
        assert_eq!(transport.exchange(frame).unwrap()[0], 0x04);
        assert_eq!(transport.exchange(frame).unwrap()[0], 0x04);
        assert_eq!(transport.exchange(frame).unwrap()[0], 0);
        assert_eq!(transport.sent_frames().len(), 3);
    }

    #[test]
    fn fails_on_the_scripted_call() {
        let mut transport = ScriptedTransport::new();
        transport.fail_on_call(2, "bus timeout");

        let frame = [0u8; 9];
        assert!(transport.exchange(frame).is_ok());
        assert!(transport.exchange(frame).is_err());
    }
}
