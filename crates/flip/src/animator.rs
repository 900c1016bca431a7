use std::f32::consts::PI;

use log::debug;

use crate::config::{ConfigError, FlipConfig};
use crate::math::{smooth_step, Quat, Vec3};

/// Where the animator is between triggers.
///
/// An explicit two-state machine rather than a boolean so further states
/// (a post-flip cooldown, say) slot in without flag combinations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipState {
    /// No animation in flight; the next trigger starts one.
    Idle,
    /// A flip is in progress. `fraction` is elapsed time over duration,
    /// unclamped; the eased interpolation clamps it.
    Flipping {
        start: Quat,
        target: Quat,
        fraction: f32,
    },
}

/// Drives a single 180° rotation about the object's local X axis per
/// accepted trigger.
///
/// ## State machine
///
/// ```text
///           trigger (accepted)
///   Idle ──────────────────────► Flipping
///    ▲                              │   trigger: dropped, no-op
///    │     fraction >= 1            │◄──────────┐
///    └──────────────────────────────┴───────────┘
///      (orientation snapped exactly to target)
/// ```
///
/// The animator owns no clock and no scene object: the driver feeds it
/// elapsed time once per tick and applies whatever orientation comes back.
/// That keeps every mutation of the animation state inside this type.
pub struct FlipAnimator {
    config: FlipConfig,
    state: FlipState,
}

impl FlipAnimator {
    /// Fails if the configured duration is non-positive; that is the only
    /// error this type can ever produce, and it surfaces here rather than
    /// mid-animation.
    pub fn new(config: FlipConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: FlipState::Idle,
        })
    }

    pub fn state(&self) -> &FlipState {
        &self.state
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.state, FlipState::Flipping { .. })
    }

    /// Attempt to start a flip from `current`.
    ///
    /// While idle: captures `current` as the start, computes the target as
    /// `current` composed with a half turn about local X — fresh each time,
    /// so consecutive flips compound — and enters `Flipping`. Returns true.
    ///
    /// While flipping: the trigger is dropped, not queued, and the running
    /// animation is untouched. Returns false.
    pub fn trigger(&mut self, current: Quat) -> bool {
        if self.is_flipping() {
            debug!("trigger dropped: flip already in flight");
            return false;
        }

        let target = current * Quat::from_axis_angle(Vec3::X, PI);
        self.state = FlipState::Flipping {
            start: current,
            target,
            fraction: 0.0,
        };
        debug!("flip started ({}s)", self.config.duration_secs);
        true
    }

    /// Advance the in-flight animation by `dt_secs` of wall-clock time.
    ///
    /// Returns the orientation to apply this tick, or `None` while idle.
    /// When accumulated time reaches the configured duration the returned
    /// orientation is the computed target bit-for-bit — no interpolation
    /// residue — and the animator goes idle.
    pub fn tick(&mut self, dt_secs: f32) -> Option<Quat> {
        let FlipState::Flipping {
            start,
            target,
            fraction,
        } = &mut self.state
        else {
            return None;
        };

        *fraction += dt_secs.max(0.0) / self.config.duration_secs;

        if *fraction >= 1.0 {
            let settled = *target;
            self.state = FlipState::Idle;
            debug!("flip complete");
            return Some(settled);
        }

        Some(start.slerp(target, smooth_step(*fraction)))
    }

    /// Abort an in-flight flip by snapping straight to its target.
    ///
    /// Not used by the stock driver (an accepted flip always runs to
    /// completion); embedders that tear a scene down mid-flip get a way to
    /// leave the object on an exact orientation. Returns the target when a
    /// flip was cancelled, `None` when already idle.
    pub fn cancel(&mut self) -> Option<Quat> {
        match self.state {
            FlipState::Flipping { target, .. } => {
                self.state = FlipState::Idle;
                debug!("flip cancelled, snapped to target");
                Some(target)
            }
            FlipState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn animator(duration: f32) -> FlipAnimator {
        FlipAnimator::new(FlipConfig::new(duration)).unwrap()
    }

    fn expected_target(from: Quat) -> Quat {
        from * Quat::from_axis_angle(Vec3::X, PI)
    }

    #[test]
    fn test_invalid_duration_rejected_at_construction() {
        assert!(FlipAnimator::new(FlipConfig::new(0.0)).is_err());
        assert!(FlipAnimator::new(FlipConfig::new(-0.45)).is_err());
    }

    #[test]
    fn test_idle_tick_is_none() {
        let mut a = animator(0.45);
        assert_eq!(a.tick(0.1), None);
        assert!(!a.is_flipping());
    }

    #[test]
    fn test_trigger_enters_flipping() {
        let mut a = animator(0.45);
        assert!(a.trigger(Quat::IDENTITY));
        assert!(a.is_flipping());
    }

    #[test]
    fn test_settles_exactly_on_target() {
        let mut a = animator(0.45);
        let start = Quat::from_axis_angle(Vec3::X, 0.3);
        a.trigger(start);
        let target = expected_target(start);

        let mut last = None;
        // 5 ticks of 0.1s: 0.5 >= 0.45.
        for _ in 0..5 {
            if let Some(q) = a.tick(0.1) {
                last = Some(q);
            }
        }

        // Bit-for-bit the computed target, not a near value.
        assert_eq!(last, Some(target));
        assert!(!a.is_flipping());
    }

    #[test]
    fn test_intermediate_samples_stay_between_endpoints() {
        let mut a = animator(1.0);
        a.trigger(Quat::IDENTITY);
        let target = expected_target(Quat::IDENTITY);

        let q = a.tick(0.5).unwrap();
        // Halfway through an eased half turn: neither endpoint.
        assert!(!q.approx_eq(&Quat::IDENTITY, EPS));
        assert!(!q.approx_eq(&target, EPS));
    }

    #[test]
    fn test_retrigger_mid_flight_is_dropped() {
        let mut a = animator(0.45);
        a.trigger(Quat::IDENTITY);
        a.tick(0.1);

        let before = *a.state();
        assert!(!a.trigger(Quat::from_axis_angle(Vec3::X, 1.0)));
        // start/target/fraction untouched; completes on the original schedule.
        assert_eq!(*a.state(), before);

        for _ in 0..4 {
            a.tick(0.1);
        }
        assert!(!a.is_flipping());
    }

    #[test]
    fn test_consecutive_flips_compound() {
        let mut a = animator(0.45);
        let initial = Quat::IDENTITY;

        a.trigger(initial);
        let mut current = initial;
        while let Some(q) = a.tick(0.1) {
            current = q;
        }
        assert!(current.approx_eq(&expected_target(initial), EPS));

        // Second flip starts from where the first landed, not from initial.
        a.trigger(current);
        while let Some(q) = a.tick(0.1) {
            current = q;
        }
        // Two half turns bring the orientation back around.
        assert!(current.approx_eq(&initial, EPS));
    }

    #[test]
    fn test_single_oversized_tick_completes() {
        let mut a = animator(0.45);
        let start = Quat::IDENTITY;
        a.trigger(start);
        assert_eq!(a.tick(10.0), Some(expected_target(start)));
        assert!(!a.is_flipping());
    }

    #[test]
    fn test_negative_dt_makes_no_progress() {
        let mut a = animator(0.45);
        a.trigger(Quat::IDENTITY);
        a.tick(-5.0);
        assert!(a.is_flipping());
        match a.state() {
            FlipState::Flipping { fraction, .. } => assert_eq!(*fraction, 0.0),
            FlipState::Idle => panic!("should still be flipping"),
        }
    }

    #[test]
    fn test_cancel_snaps_to_target() {
        let mut a = animator(0.45);
        let start = Quat::IDENTITY;
        a.trigger(start);
        a.tick(0.1);

        assert_eq!(a.cancel(), Some(expected_target(start)));
        assert!(!a.is_flipping());
        assert_eq!(a.cancel(), None);
    }

    #[test]
    fn test_trigger_accepted_again_after_completion() {
        let mut a = animator(0.45);
        a.trigger(Quat::IDENTITY);
        a.tick(1.0);
        assert!(a.trigger(Quat::IDENTITY));
    }
}
