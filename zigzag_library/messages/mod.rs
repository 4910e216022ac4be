//! Message types for the ZigZag stack
//!
//! All messages follow the same conventions: `#[repr(C)]` layouts, serde
//! derive for config/diagnostic serialization, `LogSummary` for compact
//! topic logging, constructor helpers, and unit tests at the bottom of
//! each file.

pub mod cmd_vel;
pub mod geometry;
pub mod sensor;

// Re-export all message types for convenience
pub use cmd_vel::CmdVel;
pub use geometry::{Pose2D, Quaternion, Twist, Vector3};
pub use sensor::{BumperEvent, LaserScan, Odometry};
