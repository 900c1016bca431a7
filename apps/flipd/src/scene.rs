use flip::Quat;
use log::debug;

/// The demo visual target: a stand-in for an engine-side rigid body whose
/// orientation the animator writes. Only the animator's output ever touches
/// the orientation, so the value observed here is always either an eased
/// sample or the exact flip target.
pub struct Cube {
    orientation: Quat,
}

impl Cube {
    pub fn new() -> Self {
        Self {
            orientation: Quat::IDENTITY,
        }
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn set_orientation(&mut self, q: Quat) {
        self.orientation = q;
        debug!(
            "cube orientation: ({:.4}, {:.4}, {:.4}, {:.4})",
            q.x, q.y, q.z, q.w
        );
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}
