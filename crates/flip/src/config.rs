use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Rejected at configuration time; a non-positive duration would mean
    /// dividing by zero (or running backwards) on every animation tick.
    #[error("Flip duration must be a positive number of seconds, got {0}")]
    NonPositiveDuration(f32),
}

/// Animation parameters for one flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipConfig {
    /// Wall-clock length of the rotation, in seconds.
    pub duration_secs: f32,
}

impl FlipConfig {
    pub const DEFAULT_DURATION_SECS: f32 = 0.45;

    pub fn new(duration_secs: f32) -> Self {
        Self { duration_secs }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ConfigError::NonPositiveDuration(self.duration_secs));
        }
        Ok(())
    }
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            duration_secs: Self::DEFAULT_DURATION_SECS,
        }
    }
}
