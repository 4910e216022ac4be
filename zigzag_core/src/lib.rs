//! # ZigZag Core
//!
//! The core runtime for the ZigZag reactive robotics stack.
//!
//! This crate provides the building blocks the applications are wired from:
//!
//! - **Nodes**: independent computational units with a fixed-rate `tick`
//! - **Communication**: topic-named publisher/subscriber message passing
//! - **Scheduling**: a priority-ordered fixed-rate tick loop with graceful
//!   shutdown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zigzag_core::{Hub, Node, NodeInfo};
//!
//! struct ExampleNode {
//!     output: Hub<f64>,
//! }
//!
//! impl Node for ExampleNode {
//!     fn name(&self) -> &'static str { "example" }
//!
//!     fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
//!         let _ = self.output.send(42.0, ctx.as_deref_mut());
//!     }
//! }
//! ```

pub mod communication;
pub mod core;
pub mod error;
pub mod scheduling;

// Re-export commonly used types for easy access
pub use communication::Hub;
pub use core::{LogSummary, Node, NodeConfig, NodeInfo, NodeState};
pub use error::{ZigzagError, ZigzagResult};
pub use scheduling::{Scheduler, SchedulerHandle};
