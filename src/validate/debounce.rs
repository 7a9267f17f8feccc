use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    key: String,
    version: u64,
}

/// Poll-based debounce queue for per-field revalidation.
///
/// Timers are plain data: `schedule` arms (or re-arms) a field's timer,
/// `cancel` invalidates it, and the host drains due fields with an
/// explicit `now`. Re-arming bumps a per-key version, so a stale timer
/// still sitting in the queue can never fire.
#[derive(Debug, Default)]
pub struct DebounceQueue {
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl DebounceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer for `key`, superseding any pending one.
    pub fn schedule(&mut self, key: &str, delay: Duration, now: Instant) {
        let version = self.bump_version(key);
        self.delayed.push(DelayedTask {
            due_at: now + delay,
            key: key.to_string(),
            version,
        });
    }

    /// Invalidates the pending timer for `key`, if any.
    pub fn cancel(&mut self, key: &str) {
        self.bump_version(key);
    }

    pub fn cancel_all(&mut self) {
        let keys: Vec<String> = self.key_versions.keys().cloned().collect();
        for key in keys {
            self.bump_version(&key);
        }
    }

    /// Removes and returns the keys whose timers are due, dropping
    /// superseded versions along the way.
    pub fn drain_due(&mut self, now: Instant) -> Vec<String> {
        let mut due = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                let task = self.delayed.swap_remove(idx);
                if self.task_is_current(&task) {
                    due.push(task.key);
                }
            } else {
                idx += 1;
            }
        }
        due
    }

    /// How long the host may sleep before the next timer is due.
    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let mut next = default_timeout;
        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }
        next
    }

    pub fn has_pending(&self) -> bool {
        self.delayed.iter().any(|task| self.task_is_current(task))
    }

    fn task_is_current(&self, task: &DelayedTask) -> bool {
        self.key_versions.get(&task.key).copied().unwrap_or(0) == task.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
