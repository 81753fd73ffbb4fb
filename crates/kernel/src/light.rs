use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Point light passed to the shader every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec4,
}

impl Default for Light {
    /// White light above and in front of the origin.
    fn default() -> Self {
        Self::new(Vec3::new(3.0, 3.0, 3.0), Vec4::ONE)
    }
}

impl Light {
    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self { position, color }
    }
}
