//! Mutual-exclusion lock over the host's native primitive.
//!
//! Opaque handle: `lock`/`unlock` are the only contract points the
//! condition-variable core relies on. Not recursive; unlocking from a
//! non-owner thread is a usage error the backend may or may not detect
//! (see the per-platform modules for what each backend actually catches).

use crate::error::Result;
use crate::sys::platform;

/// A non-recursive mutual-exclusion lock.
///
/// `Mutex` is move-only and not `Clone`: there is exactly one owner of the
/// underlying kernel object, matching the "don't copy or move" discipline
/// the source this crate generalizes documents for its raw primitives.
pub struct Mutex {
    inner: platform::mutex::Mutex,
}

impl Mutex {
    /// Initializes a new, unlocked mutex.
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: platform::mutex::Mutex::new()?,
        })
    }

    /// Blocks until exclusive ownership is obtained.
    ///
    /// Fails only if the underlying OS primitive reports an error; such a
    /// failure is itself a usage error (e.g. relocking an errorcheck mutex)
    /// and is logged via `tracing` before being returned.
    #[inline]
    pub fn lock(&self) -> Result<()> {
        self.inner.lock()
    }

    /// Attempts to acquire the lock without blocking.
    #[inline]
    pub fn try_lock(&self) -> bool {
        self.inner.try_lock()
    }

    /// Releases the lock. Calling this from a thread that does not hold the
    /// lock is a usage error; behavior is then undefined by contract.
    #[inline]
    pub fn unlock(&self) -> Result<()> {
        self.inner.unlock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn lock_unlock_roundtrip() {
        let m = Mutex::new().unwrap();
        m.lock().unwrap();
        m.unlock().unwrap();
    }

    #[test]
    fn try_lock_fails_while_held() {
        let m = Mutex::new().unwrap();
        m.lock().unwrap();
        assert!(!m.try_lock());
        m.unlock().unwrap();
        assert!(m.try_lock());
        m.unlock().unwrap();
    }

    #[test]
    fn excludes_concurrent_access() {
        let m = Arc::new(Mutex::new().unwrap());
        let counter = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let m = Arc::clone(&m);
            let counter = Arc::clone(&counter);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    m.lock().unwrap();
                    let v = counter.load(std::sync::atomic::Ordering::Relaxed);
                    counter.store(v + 1, std::sync::atomic::Ordering::Relaxed);
                    m.unlock().unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(counter.load(std::sync::atomic::Ordering::Relaxed), 8000);
    }
}
