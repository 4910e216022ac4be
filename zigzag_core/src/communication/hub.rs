use crate::core::node::NodeInfo;
use crate::core::LogSummary;
use crate::error::{ZigzagError, ZigzagResult};
use crossbeam::queue::ArrayQueue;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide topic registry: topic name -> type-erased ring buffer.
///
/// Endpoints created with the same topic name share one buffer; the first
/// endpoint to name a topic fixes its capacity and element type.
static TOPIC_REGISTRY: Lazy<Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

const DEFAULT_CAPACITY: usize = 64;

/// Lock-free metrics for Hub monitoring
#[derive(Debug, Default)]
pub struct AtomicHubMetrics {
    pub messages_sent: AtomicU64,
    pub messages_received: AtomicU64,
    pub messages_dropped: AtomicU64,
    pub recv_misses: AtomicU64,
}

impl AtomicHubMetrics {
    /// Get current metrics snapshot (for monitoring/debugging)
    pub fn snapshot(&self) -> HubMetrics {
        HubMetrics {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
            recv_misses: self.recv_misses.load(Ordering::Relaxed),
        }
    }
}

/// Plain metrics snapshot
#[derive(Debug, Clone, Default)]
pub struct HubMetrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub messages_dropped: u64,
    pub recv_misses: u64,
}

/// Topic-named pub/sub endpoint.
///
/// Both publishers and subscribers are `Hub<T>` values; the topic name joins
/// them to one shared ring buffer. A full buffer overwrites the oldest
/// message, so slow consumers see the freshest data rather than a backlog.
/// Messages are taken, not broadcast: pair each topic with a single
/// consumer.
pub struct Hub<T> {
    queue: Arc<ArrayQueue<T>>,
    topic_name: String,
    metrics: Arc<AtomicHubMetrics>,
}

impl<T> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            topic_name: self.topic_name.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Hub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("topic_name", &self.topic_name)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> Hub<T> {
    /// Create a new Hub
    pub fn new(topic_name: &str) -> ZigzagResult<Self> {
        Self::new_with_capacity(topic_name, DEFAULT_CAPACITY)
    }

    /// Create a new Hub with custom capacity
    ///
    /// Capacity only takes effect for the endpoint that creates the topic;
    /// later endpoints join the existing buffer.
    pub fn new_with_capacity(topic_name: &str, capacity: usize) -> ZigzagResult<Self> {
        if capacity == 0 {
            return Err(ZigzagError::InvalidInput(format!(
                "topic '{}' requested zero capacity",
                topic_name
            )));
        }

        let mut registry = TOPIC_REGISTRY.lock();
        let entry = registry
            .entry(topic_name.to_string())
            .or_insert_with(|| Arc::new(ArrayQueue::<T>::new(capacity)) as Arc<dyn Any + Send + Sync>)
            .clone();
        drop(registry);

        let queue = entry
            .downcast::<ArrayQueue<T>>()
            .map_err(|_| ZigzagError::TopicTypeMismatch(topic_name.to_string()))?;

        Ok(Hub {
            queue,
            topic_name: topic_name.to_string(),
            metrics: Arc::new(AtomicHubMetrics::default()),
        })
    }

    /// Publish a message to the topic
    ///
    /// When the ring is full the oldest message is displaced. Pass a ctx to
    /// get per-message pub logging; `None` is the zero-overhead path.
    #[inline]
    pub fn send(&self, msg: T, ctx: Option<&mut NodeInfo>) -> Result<(), T>
    where
        T: LogSummary,
    {
        // Summarize before the move; only needed when logging.
        let summary = ctx.as_ref().map(|_| msg.log_summary());

        if self.queue.force_push(msg).is_some() {
            self.metrics.messages_dropped.fetch_add(1, Ordering::Relaxed);
        }
        self.metrics.messages_sent.fetch_add(1, Ordering::Relaxed);

        if let Some(ctx) = ctx {
            ctx.log_pub_summary(&self.topic_name, summary.as_deref().unwrap_or(""));
        }

        Ok(())
    }

    /// Receive the next message from the topic
    #[inline]
    pub fn recv(&self, ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: LogSummary,
    {
        match self.queue.pop() {
            Some(msg) => {
                if let Some(ctx) = ctx {
                    ctx.log_sub_summary(&self.topic_name, &msg.log_summary());
                }
                self.metrics
                    .messages_received
                    .fetch_add(1, Ordering::Relaxed);
                Some(msg)
            }
            None => {
                self.metrics.recv_misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Drain the topic, returning only the most recent message
    ///
    /// Control nodes use this each tick to act on the freshest sensor data.
    pub fn recv_latest(&self, mut ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: LogSummary,
    {
        let mut latest = None;
        while let Some(msg) = self.recv(ctx.as_deref_mut()) {
            latest = Some(msg);
        }
        latest
    }

    /// Get current metrics snapshot (lock-free)
    pub fn get_metrics(&self) -> HubMetrics {
        self.metrics.snapshot()
    }

    /// Get the topic name for this Hub
    pub fn get_topic_name(&self) -> &str {
        &self.topic_name
    }
}
