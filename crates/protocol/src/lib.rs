use core_types::{Event, Frame};

/// Trait for converting Frames into semantic Events.
///
/// Interpretation is pure: one frame in, at most one event out, no state.
/// Returning `None` is not an error — unrecognized lines are discarded by
/// contract so the firmware can grow new message types without breaking
/// old hosts.
pub trait Decoder {
    /// Attempt to interpret a frame. `None` means the line carried no
    /// recognized message.
    fn interpret(&self, frame: &Frame) -> Option<Event>;

    /// Get the unique name of this decoder (e.g., "trigger").
    fn id(&self) -> &'static str;

    /// Get a human-readable name.
    fn name(&self) -> &'static str;
}

/// The trigger message prefix. Matching is case-sensitive and the suffix
/// (`led=1` and friends) is opaque: the firmware sends key=value content
/// there, but nothing downstream consumes it yet.
const TRIGGER_PREFIX: &str = "TRIGGER:";

/// Recognizes `TRIGGER:<suffix>` lines and maps each to [`Event::Trigger`].
///
/// Every other line is silently discarded. That branch is intentional
/// forward compatibility, not an omission: the firmware also emits lines
/// like `TRIAL:START` and `EVENT:LED_OFF` that a conforming host must be
/// able to ignore.
pub struct TriggerDecoder;

impl TriggerDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TriggerDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for TriggerDecoder {
    fn interpret(&self, frame: &Frame) -> Option<Event> {
        let line = frame.as_text();
        if line.starts_with(TRIGGER_PREFIX) {
            Some(Event::Trigger)
        } else {
            // Unknown message: reserved for future types, drop it.
            None
        }
    }

    fn id(&self) -> &'static str {
        "trigger"
    }

    fn name(&self) -> &'static str {
        "Trigger protocol"
    }
}
