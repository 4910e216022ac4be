//! Sensor data messages
//!
//! Range scans, bumper contact events, and odometry. Scan readings use NaN
//! as the "no valid return" marker, matching what depth-camera style
//! scanners report for beams that miss or saturate.

use crate::messages::geometry::{Quaternion, Twist, Vector3};
use serde::{Deserialize, Serialize};
use zigzag_core::LogSummary;

/// Number of beams in a full scan message
pub const SCAN_BEAMS: usize = 360;

/// Value returned for a scan edge with no valid reading anywhere
pub const NO_RETURN: f32 = -1.0;

/// Planar laser/depth scan
///
/// `ranges[0]` is the beam at `angle_min`; beams advance by
/// `angle_increment` toward `angle_max`. Invalid beams are NaN.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[repr(C)]
pub struct LaserScan {
    #[serde(with = "serde_arrays")]
    pub ranges: [f32; SCAN_BEAMS],
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_increment: f32,
    pub range_min: f32,
    pub range_max: f32,
    pub scan_time: f32,
    pub timestamp: u64,
}

impl LaserScan {
    pub fn new() -> Self {
        Self {
            ranges: [f32::NAN; SCAN_BEAMS],
            angle_min: -std::f32::consts::PI,
            angle_max: std::f32::consts::PI,
            angle_increment: 2.0 * std::f32::consts::PI / SCAN_BEAMS as f32,
            range_min: 0.1,
            range_max: 10.0,
            scan_time: 0.0,
            timestamp: 0,
        }
    }

    /// Get the beam angle for a range index
    pub fn angle_at(&self, index: usize) -> f32 {
        self.angle_min + index as f32 * self.angle_increment
    }

    /// Count of beams that produced a usable return
    pub fn valid_readings(&self) -> usize {
        self.ranges.iter().filter(|r| !r.is_nan()).count()
    }

    /// Nearest valid return at each extreme of the field of view
    ///
    /// Scans forward from the first beam and backward from the last,
    /// returning the first non-NaN reading found on each side, or
    /// [`NO_RETURN`] for a side with no valid reading at all.
    pub fn edge_returns(&self) -> (f32, f32) {
        let left = self
            .ranges
            .iter()
            .copied()
            .find(|r| !r.is_nan())
            .unwrap_or(NO_RETURN);
        let right = self
            .ranges
            .iter()
            .rev()
            .copied()
            .find(|r| !r.is_nan())
            .unwrap_or(NO_RETURN);
        (left, right)
    }
}

impl Default for LaserScan {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSummary for LaserScan {
    fn log_summary(&self) -> String {
        format!(
            "LaserScan(valid_readings={}/{})",
            self.valid_readings(),
            SCAN_BEAMS
        )
    }
}

/// Bumper contact event
///
/// Sent when a bumper changes state. No event on a topic means "no new
/// information"; consumers must not treat silence as a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct BumperEvent {
    /// Which bumper fired (0 = left, 1 = center, 2 = right)
    pub bumper: u8,
    /// Contact state (0 = released, 1 = pressed)
    pub state: u8,
    pub timestamp: u64,
}

impl BumperEvent {
    pub const LEFT: u8 = 0;
    pub const CENTER: u8 = 1;
    pub const RIGHT: u8 = 2;

    pub const RELEASED: u8 = 0;
    pub const PRESSED: u8 = 1;

    pub fn pressed(bumper: u8) -> Self {
        Self {
            bumper,
            state: Self::PRESSED,
            timestamp: now_nanos(),
        }
    }

    pub fn released(bumper: u8) -> Self {
        Self {
            bumper,
            state: Self::RELEASED,
            timestamp: now_nanos(),
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == Self::PRESSED
    }
}

impl LogSummary for BumperEvent {
    fn log_summary(&self) -> String {
        format!(
            "BumperEvent(bumper={}, {})",
            self.bumper,
            if self.is_pressed() {
                "pressed"
            } else {
                "released"
            }
        )
    }
}

/// Odometry: estimated pose and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Odometry {
    pub position: Vector3,
    pub orientation: Quaternion,
    pub twist: Twist,
    pub timestamp: u64,
}

impl Odometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a planar odometry sample from position and yaw
    pub fn from_planar(x: f64, y: f64, yaw_radians: f64) -> Self {
        Self {
            position: Vector3::new(x, y, 0.0),
            orientation: Quaternion::from_yaw_radians(yaw_radians),
            twist: Twist::zero(),
            timestamp: now_nanos(),
        }
    }
}

impl LogSummary for Odometry {
    fn log_summary(&self) -> String {
        format!(
            "Odometry(pos=[{:.2},{:.2}], yaw={:.1}deg)",
            self.position.x,
            self.position.y,
            self.orientation.yaw_degrees()
        )
    }
}

fn now_nanos() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
