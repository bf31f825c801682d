//! Counting semaphore with a configurable ceiling.
//!
//! This is the building block the condition-variable core uses to park and
//! wake threads without relying on a platform condvar: POSIX `sem_t` cannot
//! express an arbitrary ceiling and some backends cannot atomically release
//! `n` waiters, so the Unix side hand-rolls the counter on top of a mutex
//! and a condvar while the Windows side defers to the native primitive.

use crate::error::Result;
use crate::sys::platform;

/// A counting semaphore bounded by a ceiling fixed at construction.
pub struct Semaphore {
    inner: platform::semaphore::Semaphore,
}

impl Semaphore {
    /// Creates a semaphore with `init_count` initial permits, never allowing
    /// the count to rise above `ceiling`.
    pub fn new(init_count: u32, ceiling: u32) -> Result<Self> {
        Ok(Self {
            inner: platform::semaphore::Semaphore::new(init_count, ceiling)?,
        })
    }

    /// Blocks until a permit is available, then consumes it.
    #[inline]
    pub fn wait(&self) -> Result<()> {
        self.inner.wait()
    }

    /// Consumes a permit only if one is immediately available.
    #[inline]
    pub fn try_wait(&self) -> bool {
        self.inner.try_wait()
    }

    /// Releases `n` permits. Fails if doing so would exceed the ceiling.
    #[inline]
    pub fn signal(&self, n: u32) -> Result<()> {
        self.inner.signal(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn wait_consumes_initial_permit() {
        let s = Semaphore::new(1, 4).unwrap();
        assert!(s.try_wait());
        assert!(!s.try_wait());
    }

    #[test]
    fn signal_releases_waiter() {
        let s = Arc::new(Semaphore::new(0, 4).unwrap());
        let waiter = Arc::clone(&s);
        let handle = thread::spawn(move || waiter.wait().unwrap());
        thread::sleep(Duration::from_millis(50));
        s.signal(1).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn signal_above_ceiling_fails() {
        let s = Semaphore::new(0, 2).unwrap();
        assert!(s.signal(3).is_err());
    }

    #[test]
    fn signal_n_releases_n_waiters() {
        let s = Arc::new(Semaphore::new(0, 8).unwrap());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let s = Arc::clone(&s);
            handles.push(thread::spawn(move || s.wait().unwrap()));
        }
        thread::sleep(Duration::from_millis(50));
        s.signal(4).unwrap();
        for h in handles {
            h.join().unwrap();
        }
    }
}
