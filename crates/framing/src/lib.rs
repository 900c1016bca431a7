use core_types::Frame;
use thiserror::Error;

pub mod lines;

pub use lines::LineFramer;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// The inbox buffer hit its cap without a terminator. The buffer has
    /// been cleared; framing resynchronizes at the next terminator.
    #[error("inbox buffer overflowed {limit} bytes without a line terminator")]
    BufferOverflow { limit: usize },
}

/// Trait for converting a stream of bytes into discrete Frames.
pub trait Framer {
    /// Ingest new bytes and return any complete frames found.
    ///
    /// # Arguments
    /// * `bytes` - The new chunk of data read from transport.
    /// * `timestamp_us` - The timestamp associated with this chunk.
    fn push(&mut self, bytes: &[u8], timestamp_us: u64) -> Result<Vec<Frame>, FramingError>;

    /// Reset internal state (e.g., clear buffers).
    fn reset(&mut self);

    /// Get the name of the framer.
    fn name(&self) -> &'static str;
}
