pub mod hub;

pub use hub::{Hub, HubMetrics};
