//! # ZigZag - reactive robotics stack
//!
//! ZigZag wires small tick-driven nodes together over typed topics and
//! drives them from a fixed-rate scheduler.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zigzag::prelude::*;
//!
//! pub struct MyNode {
//!     publisher: Hub<CmdVel>,
//! }
//!
//! impl Node for MyNode {
//!     fn name(&self) -> &'static str { "MyNode" }
//!
//!     fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
//!         let _ = self.publisher.send(CmdVel::zero(), ctx.as_deref_mut());
//!     }
//! }
//! ```

// Re-export core components
pub use zigzag_core::{self, *};

// Re-export standard library with alias
pub use zigzag_library as library;

/// The ZigZag prelude - everything you need to get started
pub mod prelude {
    // Core node types
    pub use zigzag_core::core::{Node, NodeConfig, NodeInfo, NodeState};

    // Communication types
    pub use zigzag_core::communication::Hub;

    // Scheduling
    pub use zigzag_core::scheduling::{Scheduler, SchedulerHandle};

    // Error types
    pub use zigzag_core::error::{ZigzagError, ZigzagResult};
    pub type Result<T> = ZigzagResult<T>;

    // Common std types
    pub use std::sync::Arc;
    pub use std::time::{Duration, Instant};

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export anyhow for error handling in application code
    pub use anyhow::{anyhow, bail, ensure, Context, Result as AnyResult};

    // Re-export message and algorithm types for convenience
    pub use zigzag_library::prelude::*;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get ZigZag version
pub fn version() -> &'static str {
    VERSION
}
