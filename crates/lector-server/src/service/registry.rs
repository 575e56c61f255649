//! In-memory task registry with bounded capacity and expiry.
//!
//! Every upload mints a task record that clients poll until it reaches a
//! terminal state. The registry keeps those records in process memory,
//! bounded in two ways: records expire a fixed interval after creation,
//! and once the capacity is reached the oldest record is evicted to make
//! room for the next one.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lector_core::TaskRecord;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(feature = "config")]
use clap::Args;

/// Tracing target for task registry operations.
const TRACING_TARGET: &str = "lector_server::service::registry";

/// Default maximum number of task records kept in memory.
pub const DEFAULT_TASK_CAPACITY: usize = 10_000;

/// Default lifetime of a task record in seconds.
pub const DEFAULT_TASK_TTL_SECONDS: u64 = 3_600;

/// Configuration for the in-memory task registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct RegistryConfig {
    /// Maximum number of task records kept in memory.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TASK_CAPACITY", default_value_t = DEFAULT_TASK_CAPACITY)
    )]
    pub task_capacity: usize,

    /// Lifetime of a task record in seconds, counted from creation.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TASK_TTL_SECONDS", default_value_t = DEFAULT_TASK_TTL_SECONDS)
    )]
    pub task_ttl_seconds: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            task_capacity: DEFAULT_TASK_CAPACITY,
            task_ttl_seconds: DEFAULT_TASK_TTL_SECONDS,
        }
    }
}

impl RegistryConfig {
    /// Returns the record lifetime as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.task_ttl_seconds)
    }
}

/// A stored record together with its creation time.
#[derive(Debug)]
struct TaskEntry {
    record: TaskRecord,
    inserted_at: Instant,
}

/// Interior registry data guarded by one lock.
///
/// `order` holds task ids in insertion order. Records expire relative to
/// their creation time, so expired entries always form a prefix of `order`.
#[derive(Debug, Default)]
struct RegistryInner {
    tasks: HashMap<Uuid, TaskEntry>,
    order: VecDeque<Uuid>,
}

/// Bounded in-memory store for task records.
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    capacity: usize,
    ttl: Duration,
}

impl TaskRegistry {
    /// Creates a new registry from configuration.
    pub fn new(config: &RegistryConfig) -> Self {
        Self::with_limits(config.task_capacity, config.ttl())
    }

    /// Creates a new registry with explicit capacity and record lifetime.
    pub fn with_limits(capacity: usize, ttl: Duration) -> Self {
        tracing::info!(
            target: TRACING_TARGET,
            capacity = capacity,
            ttl_secs = ttl.as_secs(),
            "Task registry initialized"
        );

        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
            capacity,
            ttl,
        }
    }

    /// Stores a freshly created task record.
    ///
    /// Expired records are pruned first; if the registry is still full,
    /// the oldest record is evicted to keep the total within capacity.
    pub async fn insert(&self, record: TaskRecord) {
        let mut inner = self.inner.write().await;
        let now = Instant::now();

        self.prune_expired(&mut inner, now);

        while inner.tasks.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.tasks.remove(&oldest);

            tracing::debug!(
                target: TRACING_TARGET,
                task_id = %oldest,
                "evicted oldest task record to stay within capacity"
            );
        }

        let id = record.id;
        let entry = TaskEntry {
            record,
            inserted_at: now,
        };

        if inner.tasks.insert(id, entry).is_none() {
            inner.order.push_back(id);
        }
    }

    /// Returns a snapshot of the record, or [`None`] if it is unknown or expired.
    pub async fn get(&self, id: Uuid) -> Option<TaskRecord> {
        let inner = self.inner.read().await;
        let entry = inner.tasks.get(&id)?;

        if entry.inserted_at.elapsed() >= self.ttl {
            return None;
        }

        Some(entry.record.clone())
    }

    /// Replaces the stored record with an updated snapshot.
    ///
    /// Returns `false` if the record is no longer in the registry (evicted
    /// while the task was being processed) or has already reached a
    /// terminal state. A terminal record is never transitioned again.
    pub async fn update(&self, record: &TaskRecord) -> bool {
        let mut inner = self.inner.write().await;

        match inner.tasks.get_mut(&record.id) {
            Some(entry) if entry.record.status.is_terminal() => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    task_id = %record.id,
                    "rejected update of a terminal task record"
                );
                false
            }
            Some(entry) => {
                entry.record = record.clone();
                true
            }
            None => false,
        }
    }

    /// Returns the number of records currently stored, including expired
    /// ones that have not been pruned yet.
    pub async fn len(&self) -> usize {
        self.inner.read().await.tasks.len()
    }

    /// Returns `true` if the registry holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.tasks.is_empty()
    }

    fn prune_expired(&self, inner: &mut RegistryInner, now: Instant) {
        while let Some(front) = inner.order.front().copied() {
            let expired = inner
                .tasks
                .get(&front)
                .is_none_or(|entry| now.duration_since(entry.inserted_at) >= self.ttl);

            if !expired {
                break;
            }

            inner.order.pop_front();
            inner.tasks.remove(&front);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str) -> TaskRecord {
        TaskRecord::new(filename)
    }

    #[tokio::test]
    async fn stores_and_returns_records() {
        let registry = TaskRegistry::new(&RegistryConfig::default());
        let task = record("scan.png");
        let id = task.id;

        registry.insert(task.clone()).await;

        assert_eq!(registry.get(id).await, Some(task));
    }

    #[tokio::test]
    async fn unknown_id_returns_none() {
        let registry = TaskRegistry::new(&RegistryConfig::default());

        assert_eq!(registry.get(Uuid::new_v4()).await, None);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn update_replaces_stored_record() {
        let registry = TaskRegistry::new(&RegistryConfig::default());
        let mut task = record("scan.png");
        let id = task.id;

        registry.insert(task.clone()).await;
        task.complete("recognized text", "en");

        assert!(registry.update(&task).await);

        let stored = registry.get(id).await.unwrap();
        assert_eq!(stored.text, "recognized text");
        assert_eq!(stored.progress, 100);
    }

    #[tokio::test]
    async fn terminal_records_are_never_transitioned_again() {
        use lector_core::TaskStatus;

        let registry = TaskRegistry::new(&RegistryConfig::default());
        let mut task = record("scan.png");
        let id = task.id;

        registry.insert(task.clone()).await;
        task.complete("recognized text", "en");
        assert!(registry.update(&task).await);

        let mut overwrite = registry.get(id).await.unwrap();
        overwrite.fail("late failure");
        assert!(!registry.update(&overwrite).await);

        let stored = registry.get(id).await.unwrap();
        assert_eq!(stored.status, TaskStatus::Done);
        assert_eq!(stored.text, "recognized text");
    }

    #[tokio::test]
    async fn update_of_evicted_record_reports_failure() {
        let registry = TaskRegistry::new(&RegistryConfig::default());
        let task = record("scan.png");

        assert!(!registry.update(&task).await);
    }

    #[tokio::test]
    async fn capacity_evicts_oldest_record_first() {
        let registry = TaskRegistry::with_limits(2, Duration::from_secs(3600));
        let first = record("first.png");
        let second = record("second.png");
        let third = record("third.png");
        let first_id = first.id;

        registry.insert(first).await;
        registry.insert(second.clone()).await;
        registry.insert(third.clone()).await;

        assert_eq!(registry.len().await, 2);
        assert_eq!(registry.get(first_id).await, None);
        assert_eq!(registry.get(second.id).await, Some(second));
        assert_eq!(registry.get(third.id).await, Some(third));
    }

    #[tokio::test]
    async fn expired_records_are_not_returned() {
        let registry = TaskRegistry::with_limits(16, Duration::from_millis(10));
        let task = record("scan.png");
        let id = task.id;

        registry.insert(task).await;
        tokio::time::sleep(Duration::from_millis(25)).await;

        assert_eq!(registry.get(id).await, None);
    }

    #[tokio::test]
    async fn expired_records_are_pruned_on_insert() {
        let registry = TaskRegistry::with_limits(16, Duration::from_millis(10));

        registry.insert(record("old.png")).await;
        tokio::time::sleep(Duration::from_millis(25)).await;
        registry.insert(record("new.png")).await;

        assert_eq!(registry.len().await, 1);
    }
}
