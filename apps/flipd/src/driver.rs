use core_types::Event;
use flip::{ConfigError, FlipAnimator, FlipConfig};
use framing::{Framer, LineFramer};
use log::{debug, warn};
use protocol::{Decoder, TriggerDecoder};

use crate::scene::Cube;

/// One tick's worth of pipeline: framer → decoder → animator → scene.
///
/// Components are invoked synchronously in that fixed order every tick;
/// each datum (inbox buffer, animation state, cube orientation) has exactly
/// one owner here, so the whole pipeline needs no locking.
pub struct Driver {
    framer: LineFramer,
    decoder: TriggerDecoder,
    animator: FlipAnimator,
    cube: Option<Cube>,
}

impl Driver {
    /// The only fallible step is animation config validation; everything
    /// after construction is infallible or contained.
    pub fn new(flip_duration_secs: f32, cube: Option<Cube>) -> Result<Self, ConfigError> {
        Ok(Self {
            framer: LineFramer::new(),
            decoder: TriggerDecoder::new(),
            animator: FlipAnimator::new(FlipConfig::new(flip_duration_secs))?,
            cube,
        })
    }

    /// Run one tick: ingest `incoming` (possibly empty), then advance the
    /// animation by `dt_secs`.
    pub fn pump(&mut self, incoming: &[u8], timestamp_us: u64, dt_secs: f32) {
        if !incoming.is_empty() {
            match self.framer.push(incoming, timestamp_us) {
                Ok(frames) => {
                    for frame in &frames {
                        if let Some(Event::Trigger) = self.decoder.interpret(frame) {
                            self.on_trigger();
                        }
                    }
                }
                // Overflow is contained here: log, let the framer resync.
                Err(e) => warn!("framing: {}", e),
            }
        }

        if let Some(q) = self.animator.tick(dt_secs) {
            if let Some(cube) = self.cube.as_mut() {
                cube.set_orientation(q);
            }
        }
    }

    fn on_trigger(&mut self) {
        match self.cube.as_ref() {
            Some(cube) => {
                // Dropped silently if a flip is already in flight.
                self.animator.trigger(cube.orientation());
            }
            // Tolerate a transiently absent target rather than erroring.
            None => debug!("trigger ignored: no flip target attached"),
        }
    }

    pub fn cube(&self) -> Option<&Cube> {
        self.cube.as_ref()
    }

    pub fn is_flipping(&self) -> bool {
        self.animator.is_flipping()
    }
}
