use std::fmt;
use std::time::{Duration, Instant};

/// Trait for providing lightweight logging summaries of message types
///
/// Large payloads (scan arrays and the like) should summarize metadata only
/// instead of formatting every element.
pub trait LogSummary {
    /// Return a compact string representation suitable for logging
    fn log_summary(&self) -> String;
}

/// Node states for monitoring and lifecycle management
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Uninitialized,
    Initializing,
    Running,
    Stopping,
    Stopped,
    Error(String),
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Uninitialized => write!(f, "Uninitialized"),
            NodeState::Initializing => write!(f, "Initializing"),
            NodeState::Running => write!(f, "Running"),
            NodeState::Stopping => write!(f, "Stopping"),
            NodeState::Stopped => write!(f, "Stopped"),
            NodeState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Performance counters for node execution
#[derive(Debug, Clone, Default)]
pub struct NodeMetrics {
    pub total_ticks: u64,
    pub failed_ticks: u64,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub errors_count: u64,
    pub warnings_count: u64,
    pub last_tick_duration_us: u64,
}

/// Configuration parameters for node behavior
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            enable_logging: true,
            log_level: "INFO".to_string(),
        }
    }
}

/// Node heartbeat data for /dev/shm monitoring
#[derive(Debug, Clone)]
pub struct NodeHeartbeat {
    pub state: NodeState,
    pub tick_count: u64,
    pub error_count: u64,
    pub heartbeat_timestamp: u64,
}

impl NodeHeartbeat {
    pub fn from_metrics(state: NodeState, metrics: &NodeMetrics) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            state,
            tick_count: metrics.total_ticks,
            error_count: metrics.errors_count,
            heartbeat_timestamp: now,
        }
    }

    /// Write heartbeat to file
    ///
    /// Heartbeats are intentionally global (not session-isolated) so external
    /// monitors can watch all nodes.
    pub fn write_to_file(&self, node_name: &str) -> crate::error::ZigzagResult<()> {
        let dir = std::path::PathBuf::from("/dev/shm/zigzag/heartbeats");
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(node_name);
        let json = serde_json::json!({
            "state": self.state.to_string(),
            "tick_count": self.tick_count,
            "error_count": self.error_count,
            "heartbeat_timestamp": self.heartbeat_timestamp,
        });

        std::fs::write(&path, json.to_string())?;
        Ok(())
    }
}

/// Per-node context: identification, lifecycle state, metrics, and logging
pub struct NodeInfo {
    name: String,
    instance_id: String,

    state: NodeState,
    config: NodeConfig,
    metrics: NodeMetrics,

    creation_time: Instant,
    tick_start_time: Option<Instant>,
}

impl NodeInfo {
    pub fn new(node_name: String, logging_enabled: bool) -> Self {
        let config = NodeConfig {
            enable_logging: logging_enabled,
            ..Default::default()
        };

        Self {
            name: node_name,
            instance_id: uuid::Uuid::new_v4().to_string(),
            state: NodeState::Uninitialized,
            config,
            metrics: NodeMetrics::default(),
            creation_time: Instant::now(),
            tick_start_time: None,
        }
    }

    // State management

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn set_state(&mut self, new_state: NodeState) {
        if self.state != new_state {
            self.state = new_state;
        }
    }

    pub fn transition_to_error(&mut self, error_msg: String) {
        self.log_error(&error_msg);
        self.set_state(NodeState::Error(error_msg));
    }

    // Tick management

    pub fn start_tick(&mut self) {
        self.tick_start_time = Some(Instant::now());
    }

    pub fn record_tick(&mut self) {
        if let Some(start_time) = self.tick_start_time.take() {
            self.metrics.total_ticks += 1;
            self.metrics.last_tick_duration_us = start_time.elapsed().as_micros() as u64;
        }
    }

    pub fn record_tick_failure(&mut self, error_msg: String) {
        self.metrics.total_ticks += 1;
        self.metrics.failed_ticks += 1;
        self.tick_start_time = None;
        self.log_error(&error_msg);
    }

    // Logging

    /// Log a published message; accepts a pre-computed summary string so the
    /// caller does not need the message after moving it into the hub.
    pub fn log_pub_summary(&mut self, topic: &str, summary: &str) {
        if self.config.enable_logging {
            let now = chrono::Local::now();
            println!(
                "\x1b[36m[{}]\x1b[0m \x1b[33m{}\x1b[0m \x1b[1;32m--PUB-->\x1b[0m \x1b[35m'{}'\x1b[0m = {}",
                now.format("%H:%M:%S%.3f"),
                self.name,
                topic,
                summary
            );
        }
        self.metrics.messages_sent += 1;
    }

    /// Log a received message; same summary convention as [`Self::log_pub_summary`].
    pub fn log_sub_summary(&mut self, topic: &str, summary: &str) {
        if self.config.enable_logging {
            let now = chrono::Local::now();
            println!(
                "\x1b[36m[{}]\x1b[0m \x1b[33m{}\x1b[0m \x1b[1;34m<--SUB--\x1b[0m \x1b[35m'{}'\x1b[0m = {}",
                now.format("%H:%M:%S%.3f"),
                self.name,
                topic,
                summary
            );
        }
        self.metrics.messages_received += 1;
    }

    pub fn log_info(&self, message: &str) {
        if self.config.enable_logging
            && (self.config.log_level == "INFO" || self.config.log_level == "DEBUG")
        {
            eprintln!(
                "\x1b[34m[INFO]\x1b[0m \x1b[33m[{}]\x1b[0m {}",
                self.name, message
            );
        }
    }

    pub fn log_warning(&mut self, message: &str) {
        if self.config.enable_logging {
            eprintln!(
                "\x1b[33m[WARN]\x1b[0m \x1b[33m[{}]\x1b[0m {}",
                self.name, message
            );
        }
        self.metrics.warnings_count += 1;
    }

    pub fn log_error(&mut self, message: &str) {
        if self.config.enable_logging {
            eprintln!(
                "\x1b[31m[ERROR]\x1b[0m \x1b[33m[{}]\x1b[0m {}",
                self.name, message
            );
        }
        self.metrics.errors_count += 1;
    }

    pub fn log_debug(&self, message: &str) {
        if self.config.enable_logging && self.config.log_level == "DEBUG" {
            eprintln!(
                "\x1b[90m[DEBUG]\x1b[0m \x1b[33m[{}]\x1b[0m {}",
                self.name, message
            );
        }
    }

    // Getters

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }
    pub fn uptime(&self) -> Duration {
        self.creation_time.elapsed()
    }

    pub fn set_config(&mut self, config: NodeConfig) {
        self.config = config;
    }
}

/// Trait for ZigZag nodes with full lifecycle support
pub trait Node: Send {
    /// Get the node's name (must be unique)
    fn name(&self) -> &'static str;

    /// Initialize the node (called once at startup)
    fn init(&mut self, ctx: &mut NodeInfo) -> crate::error::ZigzagResult<()> {
        ctx.log_info("Node initialized successfully");
        Ok(())
    }

    /// Main execution loop (called repeatedly)
    fn tick(&mut self, ctx: Option<&mut NodeInfo>);

    /// Shutdown the node (called once at cleanup)
    fn shutdown(&mut self, ctx: &mut NodeInfo) -> crate::error::ZigzagResult<()> {
        ctx.log_info("Node shutdown successfully");
        Ok(())
    }

    /// Health check (optional override)
    fn is_healthy(&self) -> bool {
        true
    }
}

// LogSummary implementations for primitive types
impl LogSummary for f32 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for f64 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for i32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u64 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for usize {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for bool {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for String {
    fn log_summary(&self) -> String {
        self.clone()
    }
}
