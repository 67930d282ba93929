//! Live-allocation accounting for leak diagnostics.
//!
//! A [`LiveCounter`] tracks how many non-empty containers are currently
//! alive. Each container holds a [`LiveToken`] that increments the counter
//! when acquired and decrements it when dropped, so the count follows
//! ownership without any explicit bookkeeping at release sites.
//!
//! The counter is diagnostic only; no container behaviour depends on it.

use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Process-wide counter shared by every [`LiveCounter::process`] handle.
static PROCESS_COUNTER: OnceLock<LiveCounter> = OnceLock::new();

/// Shared, thread-safe count of outstanding containers.
///
/// Cloning yields another handle to the same count.
#[derive(Clone, Debug, Default)]
pub struct LiveCounter {
    count: Arc<AtomicIsize>,
}

impl LiveCounter {
    /// Create a fresh counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the process-wide counter.
    pub fn process() -> Self {
        PROCESS_COUNTER.get_or_init(LiveCounter::new).clone()
    }

    /// Number of containers currently alive.
    pub fn get(&self) -> isize {
        self.count.load(Ordering::Relaxed)
    }

    /// Register one new container.
    pub fn acquire(&self) -> LiveToken {
        self.count.fetch_add(1, Ordering::Relaxed);
        LiveToken {
            count: Arc::clone(&self.count),
        }
    }

    /// Whether two handles observe the same count.
    pub fn same_counter(&self, other: &LiveCounter) -> bool {
        Arc::ptr_eq(&self.count, &other.count)
    }
}

/// Proof of one registration with a [`LiveCounter`].
///
/// Dropping the token releases the registration.
#[derive(Debug)]
#[must_use]
pub struct LiveToken {
    count: Arc<AtomicIsize>,
}

impl LiveToken {
    /// A handle to the counter this token is registered with.
    pub fn counter(&self) -> LiveCounter {
        LiveCounter {
            count: Arc::clone(&self.count),
        }
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lifetime_drives_count() {
        let counter = LiveCounter::new();
        assert_eq!(counter.get(), 0);
        let a = counter.acquire();
        let b = counter.acquire();
        assert_eq!(counter.get(), 2);
        drop(a);
        assert_eq!(counter.get(), 1);
        drop(b);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn clones_share_the_count() {
        let counter = LiveCounter::new();
        let other = counter.clone();
        let _t = other.acquire();
        assert_eq!(counter.get(), 1);
        assert!(counter.same_counter(&other));
        assert!(!counter.same_counter(&LiveCounter::new()));
    }

    #[test]
    fn token_reports_its_counter() {
        let counter = LiveCounter::new();
        let t = counter.acquire();
        assert!(t.counter().same_counter(&counter));
    }

    #[test]
    fn process_counter_is_shared() {
        assert!(LiveCounter::process().same_counter(&LiveCounter::process()));
    }

    #[test]
    fn concurrent_acquire_release_balances() {
        let counter = LiveCounter::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let _t = c.acquire();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(counter.get(), 0);
    }
}
