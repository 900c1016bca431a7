use serde::{Deserialize, Serialize};

pub mod transport;
pub use transport::{SerialConfig, Transport, TransportError};

/// Represents the direction of data flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Rx, // Received from device
    Tx, // Sent to device
}

/// One complete logical line extracted from the byte stream.
///
/// `bytes` hold the line content with the terminator stripped and
/// surrounding ASCII whitespace trimmed. The framer guarantees one Frame
/// per terminator, in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    /// The trimmed line content.
    pub bytes: Vec<u8>,
    /// Timestamp in microseconds of the first byte of this line.
    pub timestamp_us: u64,
    /// Direction of the frame.
    pub channel: Channel,
}

impl Frame {
    pub fn new_rx(bytes: Vec<u8>, timestamp_us: u64) -> Self {
        Self {
            bytes,
            timestamp_us,
            channel: Channel::Rx,
        }
    }

    pub fn new_tx(bytes: Vec<u8>, timestamp_us: u64) -> Self {
        Self {
            bytes,
            timestamp_us,
            channel: Channel::Tx,
        }
    }

    /// Line content as text. The wire protocol is ASCII; invalid UTF-8 is
    /// replaced rather than rejected so a noisy line still reaches the
    /// decoder (which will discard it).
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// A semantic interpretation of a Frame.
///
/// Currently a single variant: the wire protocol recognizes only
/// `TRIGGER:` lines, and their suffix carries no parsed payload. New
/// message types (`TRIAL:START`, `EVENT:LED_OFF`) get new variants here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// One flip attempt. At most one is accepted per animation.
    Trigger,
}
