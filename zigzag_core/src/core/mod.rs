pub mod node;

pub use node::{
    LogSummary, Node, NodeConfig, NodeHeartbeat, NodeInfo, NodeMetrics, NodeState,
};
