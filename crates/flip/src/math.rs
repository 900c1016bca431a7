//! Just enough 3D math for a single-axis flip: a unit quaternion with
//! composition and slerp, the axis vector to build it from, and the
//! smoothstep easing curve. Angles are radians, components are f32.

use std::ops::Mul;

/// A direction in the object's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const X: Vec3 = Vec3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy. A zero vector comes back unchanged rather than NaN.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > f32::EPSILON {
            Self::new(self.x / len, self.y / len, self.z / len)
        } else {
            *self
        }
    }
}

/// A unit quaternion representing an orientation or rotation.
///
/// Composition follows the `a * b` = "apply `b` in `a`'s local frame"
/// convention, so `orientation * half_turn_x` rotates about the object's
/// own X axis — which is what makes consecutive flips compound instead of
/// slamming back to a world-space pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    pub fn dot(&self, other: &Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > f32::EPSILON {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::IDENTITY
        }
    }

    fn scaled(&self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }

    fn added(&self, other: &Quat) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }

    /// Spherical interpolation from `self` (t=0) to `other` (t=1).
    ///
    /// Takes the shortest path (q and -q are the same rotation), and falls
    /// back to normalized lerp when the quaternions are nearly parallel and
    /// the sin in the slerp denominator loses precision.
    pub fn slerp(&self, other: &Quat, t: f32) -> Self {
        let mut dot = self.dot(other);
        let mut end = *other;
        if dot < 0.0 {
            end = end.scaled(-1.0);
            dot = -dot;
        }

        if dot > 0.9995 {
            // Nearly parallel: nlerp is indistinguishable and stable.
            return self
                .scaled(1.0 - t)
                .added(&end.scaled(t))
                .normalized();
        }

        let theta = dot.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        self.scaled(a).added(&end.scaled(b)).normalized()
    }

    /// Whether two quaternions describe the same orientation within `eps`,
    /// treating q and -q as equal.
    pub fn approx_eq(&self, other: &Quat, eps: f32) -> bool {
        self.dot(other).abs() >= 1.0 - eps
    }
}

impl Mul for Quat {
    type Output = Quat;

    // Hamilton product.
    fn mul(self, rhs: Quat) -> Quat {
        Quat::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

/// Clamp `t` to [0, 1] and remap with `t*t*(3 - 2t)`.
///
/// Zero first derivative at both ends, so the flip accelerates out of rest
/// and decelerates into the target instead of rotating mechanically.
pub fn smooth_step(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
