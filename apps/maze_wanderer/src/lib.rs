//! Maze wanderer application
//!
//! Two nodes on a fixed-rate scheduler: a simulated maze environment and
//! the bump-and-turn wandering controller. The run ends when the robot's
//! absolute position enters the goal rectangle.

pub mod config;
pub mod sim_node;
pub mod wanderer_node;

pub use config::WanderConfig;
pub use sim_node::MazeSimNode;
pub use wanderer_node::WandererNode;

/// Topic names the two nodes meet on
pub mod topics {
    pub const SCAN: &str = "scan";
    pub const BUMPER: &str = "bumper_events";
    pub const ODOM: &str = "odom";
    pub const MODEL_POSE: &str = "model_pose";
    pub const CMD_VEL: &str = "cmd_vel";
}
