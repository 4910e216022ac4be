//! # ZigZag Library
//!
//! Standard messages and pure algorithms for the ZigZag stack.
//!
//! - [`messages`]: typed topic payloads (LaserScan, BumperEvent, Odometry,
//!   Pose2D, CmdVel and the geometry primitives they build on)
//! - [`algorithms`]: computation with no I/O dependencies (angle
//!   arithmetic, the wandering policy state machine, goal-region tests)

pub mod algorithms;
pub mod messages;

// Re-export the logging trait message types implement
pub use zigzag_core::LogSummary;

// Re-export message types at the crate root for convenience
pub use messages::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::angles::{angular_difference, normalize_degrees};
    pub use crate::algorithms::goal::GoalRegion;
    pub use crate::algorithms::wander::{BotState, TurnDirection, WanderPhase, WanderPolicy};
    pub use crate::messages::{
        cmd_vel::CmdVel,
        geometry::{Pose2D, Quaternion, Twist, Vector3},
        sensor::{BumperEvent, LaserScan, Odometry},
    };
    pub use crate::LogSummary;
}
