use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A camera transform the shake writes into but does not own.
///
/// Other systems may move the same transform between ticks; the shake only
/// ever removes and re-adds its own contribution.
pub trait ShakeTarget {
    fn local_position(&mut self) -> &mut Vec3;
    fn local_rotation(&mut self) -> &mut Quat;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Same pose within `epsilon`, treating `q` and `-q` as one rotation.
    pub fn abs_diff_eq(&self, other: &Transform, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && (self.rotation.abs_diff_eq(other.rotation, epsilon)
                || self.rotation.abs_diff_eq(-other.rotation, epsilon))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

impl ShakeTarget for Transform {
    fn local_position(&mut self) -> &mut Vec3 {
        &mut self.position
    }

    fn local_rotation(&mut self) -> &mut Quat {
        &mut self.rotation
    }
}
