#![forbid(unsafe_code)]

//! Named-channel task scheduler.
//!
//! [`AnimationManager`] holds deferred tasks on a virtual clock. Each task is
//! scheduled under a channel name; scheduling into a channel that already
//! holds a pending task cancels that task first, so bursts of requests
//! collapse into the latest one. The empty channel ([`UNSHARED`]) never
//! collapses.
//!
//! Nothing runs by itself: the owner calls [`AnimationManager::advance`] and
//! executes the returned tasks one after another.
//!
//! # Invariants
//!
//! - **Latest-wins**: at most one task is pending per non-empty channel.
//! - **Ordered**: due tasks come out sorted by due time, ties in scheduling
//!   order.
//! - **Deterministic**: identical schedules and advances yield identical
//!   output.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Cancel an already-run handle | Returns `false` |
//! | `advance(Duration::ZERO)` | Runs tasks due exactly now |
//! | Clock overflow | Saturates |

use std::time::Duration;

/// Channel name whose tasks never replace one another.
pub const UNSHARED: &str = "";

/// Identifies one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    id: u64,
    due: Duration,
    channel: String,
    task: T,
}

/// Cooperative scheduler of deferred tasks grouped by channel.
#[derive(Debug)]
pub struct AnimationManager<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for AnimationManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnimationManager<T> {
    /// Create an empty scheduler with its clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `task` to run `delay` from now under `channel`.
    ///
    /// A task already pending in the same non-empty channel is cancelled.
    pub fn schedule(&mut self, task: T, channel: &str, delay: Duration) -> TaskHandle {
        if channel != UNSHARED {
            self.cancel_channel(channel);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay),
            channel: channel.to_string(),
            task,
        });
        TaskHandle(id)
    }

    /// Cancel one task. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != handle.0);
        self.pending.len() != before
    }

    /// Cancel every task pending in `channel`. Returns how many were removed.
    pub fn cancel_channel(&mut self, channel: &str) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.channel != channel);
        let removed = before - self.pending.len();
        if removed > 0 {
            iform_core::trace!(channel, removed, "cancelled pending task");
        }
        removed
    }

    /// Whether `handle` has neither run nor been cancelled.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.id == handle.0)
    }

    /// Whether anything is pending in `channel`.
    pub fn is_channel_pending(&self, channel: &str) -> bool {
        self.pending.iter().any(|p| p.channel == channel)
    }

    /// Number of pending tasks.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending task is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward by `dt` and take every task that is now due.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due, p.id));
        due.into_iter().map(|p| p.task).collect()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
