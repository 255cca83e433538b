//! Instrumentation for the turn-exclusivity invariant.
//!
//! Each player enters the monitor while Placing or Attacking and leaves it
//! when the action resolves. The peak count must never exceed 1; tests run
//! full matches and assert exactly that.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of players currently in an active phase.
#[derive(Debug, Default)]
pub struct ActivityMonitor {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ActivityMonitor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark one player active; the returned guard marks it inactive on drop.
    pub fn activate(self: &Arc<Self>) -> ActivityGuard {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        ActivityGuard {
            monitor: Arc::clone(self),
        }
    }

    /// Players active right now.
    pub fn active_now(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously active players observed so far.
    /// 1 means the exclusivity invariant held.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// RAII guard for one player's active phase.
pub struct ActivityGuard {
    monitor: Arc<ActivityMonitor>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.monitor.active.fetch_sub(1, Ordering::SeqCst);
    }
}
