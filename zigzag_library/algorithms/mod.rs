//! Pure computational algorithms
//!
//! This module contains computation logic with no I/O dependencies, reusable
//! by any node or external code.
//!
//! - **angles**: arithmetic over the circular degree domain (-180, 180]
//! - **goal**: axis-aligned goal-region containment tests
//! - **wander**: the reactive bump-and-turn wandering state machine

pub mod angles;
pub mod goal;
pub mod wander;
