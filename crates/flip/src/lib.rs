pub mod animator;
pub mod config;
pub mod math;

pub use animator::{FlipAnimator, FlipState};
pub use config::{ConfigError, FlipConfig};
pub use math::{smooth_step, Quat, Vec3};
