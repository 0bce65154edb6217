use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    acquired: AtomicU64,
    released: AtomicU64,
}

/// Counts connection handles taken and given back by a transport
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    counters: Arc<Counters>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a handle for one exchange. It is released when the guard drops.
    pub fn acquire(&self) -> ConnectionGuard {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            counters: Arc::clone(&self.counters),
        }
    }

    pub fn acquired(&self) -> u64 {
        self.counters.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> u64 {
        self.counters.released.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> u64 {
        self.acquired().saturating_sub(self.released())
    }
}

/// Scoped handle for a single request; releases on every exit path
#[derive(Debug)]
pub struct ConnectionGuard {
    counters: Arc<Counters>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let tracker = ConnectionTracker::new();
        {
            let _guard = tracker.acquire();
            assert_eq!(tracker.in_flight(), 1);
        }
        assert_eq!(tracker.acquired(), 1);
        assert_eq!(tracker.released(), 1);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn test_guard_releases_on_early_return() {
        fn fails(tracker: &ConnectionTracker) -> Result<u32, std::num::ParseIntError> {
            let _guard = tracker.acquire();
            let value: u32 = "not a number".parse()?;
            Ok(value)
        }

        let tracker = ConnectionTracker::new();
        assert!(fails(&tracker).is_err());
        assert_eq!(tracker.released(), 1);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn test_clones_share_counters() {
        let tracker = ConnectionTracker::new();
        let clone = tracker.clone();
        drop(clone.acquire());
        assert_eq!(tracker.acquired(), 1);
        assert_eq!(tracker.released(), 1);
    }
}
