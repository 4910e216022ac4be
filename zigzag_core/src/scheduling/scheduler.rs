use crate::core::{Node, NodeHeartbeat, NodeInfo, NodeState};
use crate::error::{ZigzagError, ZigzagResult};
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Node registration info with lifecycle tracking and per-node rate control
struct RegisteredNode {
    node: Box<dyn Node>,
    priority: u32,
    initialized: bool,
    context: NodeInfo,
    rate_hz: Option<f64>, // None = use global scheduler rate
    last_tick: Option<Instant>,
}

/// Cloneable handle for requesting scheduler shutdown from inside a node
/// or another thread.
#[derive(Clone)]
pub struct SchedulerHandle {
    running: Arc<AtomicBool>,
}

impl SchedulerHandle {
    /// Ask the scheduler to stop after the current tick
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Central orchestrator: holds nodes, drives the tick loop.
pub struct Scheduler {
    nodes: Vec<RegisteredNode>,
    running: Arc<AtomicBool>,
    scheduler_name: String,
    tick_rate_hz: f64,
    last_heartbeat: Instant,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty scheduler with a 60 Hz global rate.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            running: Arc::new(AtomicBool::new(true)),
            scheduler_name: "DefaultScheduler".to_string(),
            tick_rate_hz: 60.0,
            last_heartbeat: Instant::now(),
        }
    }

    /// Set scheduler name (for debugging/logging)
    pub fn with_name(mut self, name: &str) -> Self {
        self.scheduler_name = name.to_string();
        self
    }

    /// Set the global tick rate (builder pattern)
    pub fn with_rate_hz(mut self, rate_hz: f64) -> Self {
        self.tick_rate_hz = rate_hz.max(0.1);
        self
    }

    /// Add a node with given priority (lower number = higher priority).
    /// If logging is `None` it defaults to off.
    ///
    /// # Example
    /// ```ignore
    /// scheduler.add(Box::new(node), 0, Some(true));
    /// ```
    pub fn add(
        &mut self,
        node: Box<dyn Node>,
        priority: u32,
        logging_enabled: Option<bool>,
    ) -> &mut Self {
        let node_name = node.name().to_string();
        let logging_enabled = logging_enabled.unwrap_or(false);
        let context = NodeInfo::new(node_name, logging_enabled);

        self.nodes.push(RegisteredNode {
            node,
            priority,
            initialized: false,
            context,
            rate_hz: None,
            last_tick: None,
        });
        self
    }

    /// Set per-node rate control (chainable)
    ///
    /// Lets individual nodes run slower than the global scheduler rate.
    pub fn set_node_rate(&mut self, name: &str, rate_hz: f64) -> &mut Self {
        for registered in self.nodes.iter_mut() {
            if registered.node.name() == name {
                registered.rate_hz = Some(rate_hz);
                registered.last_tick = None;
                break;
            }
        }
        self
    }

    /// Get a handle that can stop this scheduler from elsewhere
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            running: self.running.clone(),
        }
    }

    /// Stop the scheduler
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Main loop with automatic signal handling and cleanup
    pub fn run(&mut self) -> ZigzagResult<()> {
        self.run_with_duration(None)
    }

    /// Run all nodes for a specified duration, then shutdown gracefully
    pub fn run_for(&mut self, duration: Duration) -> ZigzagResult<()> {
        self.run_with_duration(Some(duration))
    }

    fn run_with_duration(&mut self, duration: Option<Duration>) -> ZigzagResult<()> {
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ZigzagError::Internal(format!("failed to create tokio runtime: {}", e)))?;

        rt.block_on(async {
            let start_time = Instant::now();

            // Set up signal handling
            let running = self.running.clone();
            if let Err(e) = ctrlc::set_handler(move || {
                eprintln!("{}", "\nCtrl+C received! Shutting down scheduler...".red());
                running.store(false, Ordering::SeqCst);
                std::thread::spawn(|| {
                    std::thread::sleep(Duration::from_secs(2));
                    eprintln!("{}", "Force terminating application...".red());
                    std::process::exit(0);
                });
            }) {
                eprintln!("Warning: failed to set signal handler: {}", e);
            }

            // Lower priority number runs first
            self.nodes.sort_by_key(|r| r.priority);

            // Initialize nodes
            for registered in self.nodes.iter_mut() {
                let node_name = registered.node.name();
                match registered.node.init(&mut registered.context) {
                    Ok(()) => {
                        registered.initialized = true;
                        registered.context.set_state(NodeState::Running);
                        println!("Initialized node '{}'", node_name);
                    }
                    Err(e) => {
                        println!("Failed to initialize node '{}': {}", node_name, e);
                        registered
                            .context
                            .transition_to_error(format!("initialization failed: {}", e));
                    }
                }
            }

            let tick_period = Duration::from_secs_f64(1.0 / self.tick_rate_hz);

            // Main tick loop
            while self.is_running() {
                if let Some(max_duration) = duration {
                    if start_time.elapsed() >= max_duration {
                        println!("Scheduler reached time limit of {:?}", max_duration);
                        break;
                    }
                }

                let loop_start = Instant::now();

                for registered in self.nodes.iter_mut() {
                    if !registered.initialized {
                        continue;
                    }

                    // Per-node rate gating
                    if let Some(rate_hz) = registered.rate_hz {
                        let min_gap = Duration::from_secs_f64(1.0 / rate_hz);
                        if let Some(last) = registered.last_tick {
                            if last.elapsed() < min_gap {
                                continue;
                            }
                        }
                    }

                    registered.context.start_tick();
                    registered.node.tick(Some(&mut registered.context));
                    registered.context.record_tick();
                    registered.last_tick = Some(Instant::now());
                }

                self.write_heartbeats();

                let elapsed = loop_start.elapsed();
                if elapsed < tick_period {
                    tokio::time::sleep(tick_period - elapsed).await;
                }
            }

            // Shutdown nodes in reverse priority order
            for registered in self.nodes.iter_mut().rev() {
                if !registered.initialized {
                    continue;
                }
                registered.context.set_state(NodeState::Stopping);
                if let Err(e) = registered.node.shutdown(&mut registered.context) {
                    eprintln!(
                        "Failed to shutdown node '{}': {}",
                        registered.node.name(),
                        e
                    );
                }
                registered.context.set_state(NodeState::Stopped);
            }

            println!(
                "{}",
                format!("Scheduler '{}' stopped", self.scheduler_name).green()
            );
            Ok(())
        })
    }

    // Heartbeats are throttled to roughly 1 Hz regardless of tick rate.
    fn write_heartbeats(&mut self) {
        if self.last_heartbeat.elapsed() < Duration::from_secs(1) {
            return;
        }
        self.last_heartbeat = Instant::now();

        for registered in self.nodes.iter() {
            let heartbeat = NodeHeartbeat::from_metrics(
                registered.context.state().clone(),
                registered.context.metrics(),
            );
            let _ = heartbeat.write_to_file(registered.node.name());
        }
    }
}
