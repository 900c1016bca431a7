use crate::{Framer, FramingError};
use core_types::Frame;

const DEFAULT_MAX_BUFFER: usize = 64 * 1024;

/// Buffers input and emits one frame per newline encountered.
///
/// Frames carry the line content trimmed of the terminator and surrounding
/// ASCII whitespace (a `\r` before the `\n` disappears with the trim, so
/// CRLF input frames the same as LF). An empty-after-trim line is still a
/// valid frame; deciding what to do with it belongs to the decoder.
///
/// The inbox buffer is capped: a stream that never sends a terminator would
/// otherwise grow it without bound. Hitting the cap fails the push with
/// [`FramingError::BufferOverflow`] and clears the buffer, so the stream
/// resynchronizes at the next terminator.
pub struct LineFramer {
    buffer: Vec<u8>,
    max_buffer: usize,
    overflow_count: u64,
    // Timestamp of the *first byte* currently in the buffer.
    // This ensures that when a line is completed, it gets the timestamp of when it started arriving.
    start_timestamp_us: Option<u64>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::with_max_buffer(DEFAULT_MAX_BUFFER)
    }

    /// `max_buffer` bounds the longest partial line held across pushes.
    /// Zero is treated as the default cap.
    pub fn with_max_buffer(max_buffer: usize) -> Self {
        let max_buffer = if max_buffer == 0 {
            DEFAULT_MAX_BUFFER
        } else {
            max_buffer
        };
        Self {
            buffer: Vec::with_capacity(1024.min(max_buffer)),
            max_buffer,
            overflow_count: 0,
            start_timestamp_us: None,
        }
    }

    /// How many times the buffer cap has been hit since construction.
    pub fn overflow_count(&self) -> u64 {
        self.overflow_count
    }

    /// Bytes currently held waiting for a terminator.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framer for LineFramer {
    fn push(&mut self, bytes: &[u8], timestamp_us: u64) -> Result<Vec<Frame>, FramingError> {
        let mut frames = Vec::new();

        // If buffer was empty, this chunk marks the start of potential new frames.
        if self.buffer.is_empty() {
            self.start_timestamp_us = Some(timestamp_us);
        }

        for &b in bytes {
            if b == b'\n' {
                // Timestamp of the line is the start time of its first byte.
                let ts = self.start_timestamp_us.unwrap_or(timestamp_us);
                let line = trim_ascii(&self.buffer).to_vec();
                frames.push(Frame::new_rx(line, ts));

                self.buffer.clear();
                self.start_timestamp_us = None;
                continue;
            }

            if self.buffer.len() >= self.max_buffer {
                // Fail fast rather than grow without bound on a
                // terminator-less stream. Whatever partial line was
                // accumulating is unrecoverable; drop it and let the
                // stream resynchronize at the next terminator. Frames
                // already extracted in this push are dropped with it,
                // which only matters on a stream that is already broken.
                self.buffer.clear();
                self.start_timestamp_us = None;
                self.overflow_count += 1;
                return Err(FramingError::BufferOverflow {
                    limit: self.max_buffer,
                });
            }

            self.buffer.push(b);
        }

        // If we still have data in buffer (incomplete line),
        // ensure start_timestamp_us is set for the *next* push call reference.
        if !self.buffer.is_empty() && self.start_timestamp_us.is_none() {
            self.start_timestamp_us = Some(timestamp_us);
        }

        Ok(frames)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.start_timestamp_us = None;
    }

    fn name(&self) -> &'static str {
        "Lines"
    }
}

/// Strip leading/trailing ASCII whitespace (space, tab, CR, LF).
/// `slice::trim_ascii` needs Rust 1.80; the workspace floor is 1.75.
fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_simple() {
        let mut framer = LineFramer::new();
        let frames = framer.push(b"Hello\nWorld\n", 100).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].bytes, b"Hello");
        assert_eq!(frames[0].timestamp_us, 100);
        assert_eq!(frames[1].bytes, b"World");
    }

    #[test]
    fn test_lines_split_across_pushes() {
        let mut framer = LineFramer::new();
        // Chunk 1: "TRIG" at T=100
        let f1 = framer.push(b"TRIG", 100).unwrap();
        assert_eq!(f1.len(), 0);

        // Chunk 2: "GER:x\n" at T=200
        let f2 = framer.push(b"GER:x\n", 200).unwrap();
        assert_eq!(f2.len(), 1);
        assert_eq!(f2[0].bytes, b"TRIGGER:x");
        // Should preserve the timestamp of the START of the frame (T=100)
        assert_eq!(f2[0].timestamp_us, 100);
    }

    #[test]
    fn test_crlf_trimmed() {
        let mut framer = LineFramer::new();
        let f = framer.push(b"Test\r\n", 100).unwrap();
        assert_eq!(f[0].bytes, b"Test");
    }

    #[test]
    fn test_whitespace_only_line_is_empty_frame() {
        let mut framer = LineFramer::new();
        let f = framer.push(b"   \t \n", 100).unwrap();
        assert_eq!(f.len(), 1);
        assert!(f[0].bytes.is_empty());
    }

    #[test]
    fn test_empty_chunk_is_noop() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"", 100).unwrap().is_empty());
        assert_eq!(framer.pending_len(), 0);
    }

    #[test]
    fn test_split_invariance() {
        // Any chunking of the same stream yields the same frames in the
        // same order as a single push of the whole stream.
        let stream = b"TRIGGER:led=1\nNOISE\n  padded  \nTRIGGER:\n";

        let mut whole = LineFramer::new();
        let expected: Vec<Vec<u8>> = whole
            .push(stream, 0)
            .unwrap()
            .into_iter()
            .map(|f| f.bytes)
            .collect();
        assert_eq!(expected.len(), 4);

        for chunk_size in 1..stream.len() {
            let mut framer = LineFramer::new();
            let mut got = Vec::new();
            for chunk in stream.chunks(chunk_size) {
                got.extend(
                    framer
                        .push(chunk, 0)
                        .unwrap()
                        .into_iter()
                        .map(|f| f.bytes),
                );
            }
            assert_eq!(got, expected, "chunk_size={}", chunk_size);
        }
    }

    #[test]
    fn test_no_terminator_left_in_buffer_after_push() {
        let mut framer = LineFramer::new();
        framer.push(b"a\nb\npartial", 0).unwrap();
        // Only the unterminated tail remains.
        assert_eq!(framer.pending_len(), "partial".len());
    }

    #[test]
    fn test_overflow_fails_fast_and_resyncs() {
        let mut framer = LineFramer::with_max_buffer(8);
        let err = framer.push(b"0123456789abcdef", 0).unwrap_err();
        assert_eq!(err, FramingError::BufferOverflow { limit: 8 });
        assert_eq!(framer.overflow_count(), 1);
        assert_eq!(framer.pending_len(), 0);

        // Stream keeps working after the overflow.
        let frames = framer.push(b"ok\n", 10).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bytes, b"ok");
    }

    #[test]
    fn test_overflow_not_triggered_when_terminators_present() {
        let mut framer = LineFramer::with_max_buffer(8);
        // Each line fits under the cap individually.
        let frames = framer.push(b"aaaa\nbbbb\ncccc\n", 0).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(framer.overflow_count(), 0);
    }

    #[test]
    fn test_reset_clears_partial() {
        let mut framer = LineFramer::new();
        framer.push(b"dangling", 0).unwrap();
        framer.reset();
        let frames = framer.push(b"fresh\n", 1).unwrap();
        assert_eq!(frames[0].bytes, b"fresh");
        assert_eq!(frames[0].timestamp_us, 1);
    }
}
