//! Spatial primitives shared by the sensor and command messages.

use crate::algorithms::angles::normalize_degrees;
use serde::{Deserialize, Serialize};
use zigzag_core::LogSummary;

/// 3D vector (meters or meters/second depending on context)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

unsafe impl bytemuck::Pod for Vector3 {}
unsafe impl bytemuck::Zeroable for Vector3 {}

/// Unit quaternion orientation (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Build a pure-z rotation from a yaw angle in radians
    pub fn from_yaw_radians(yaw: f64) -> Self {
        let half = yaw / 2.0;
        Self::new(0.0, 0.0, half.sin(), half.cos())
    }

    /// Extract yaw (rotation about z) in radians
    pub fn yaw_radians(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }

    /// Extract yaw in degrees, wrapped into (-180, 180]
    pub fn yaw_degrees(&self) -> f64 {
        normalize_degrees(self.yaw_radians().to_degrees())
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

unsafe impl bytemuck::Pod for Quaternion {}
unsafe impl bytemuck::Zeroable for Quaternion {}

/// Planar pose in the world frame
///
/// Carried on its own topic as the absolute ground-truth position feed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    /// Orientation in radians
    pub theta: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }
}

unsafe impl bytemuck::Pod for Pose2D {}
unsafe impl bytemuck::Zeroable for Pose2D {}

impl LogSummary for Pose2D {
    fn log_summary(&self) -> String {
        format!("Pose2D({:.2}, {:.2}, {:.2}rad)", self.x, self.y, self.theta)
    }
}

/// Linear and angular velocity, component per axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Twist {
    pub linear: [f64; 3],
    pub angular: [f64; 3],
}

impl Twist {
    pub fn zero() -> Self {
        Self::default()
    }
}

unsafe impl bytemuck::Pod for Twist {}
unsafe impl bytemuck::Zeroable for Twist {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quaternion_yaw_roundtrip() {
        for &yaw in &[0.0f64, 0.5, -0.5, 1.2, -3.0, 3.1] {
            let q = Quaternion::from_yaw_radians(yaw);
            assert_relative_eq!(q.yaw_radians(), yaw, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_yaw_degrees_wraps() {
        let q = Quaternion::from_yaw_radians(std::f64::consts::PI);
        // pi radians is exactly the seam; it must land at +180, not -180
        assert_relative_eq!(q.yaw_degrees(), 180.0, epsilon = 1e-6);
    }

    #[test]
    fn test_identity_has_zero_yaw() {
        assert_relative_eq!(Quaternion::identity().yaw_degrees(), 0.0);
    }
}
