//! An ergonomic counting semaphore over [`corewait_sys::Semaphore`].
//!
//! Mirrors the permit/RAII-release shape `nx-std-sync`'s semaphore wrapper
//! uses: [`acquire`](Semaphore::acquire) and
//! [`try_acquire`](Semaphore::try_acquire) hand back a [`SemaphorePermit`]
//! that releases itself on drop instead of requiring a manual `signal`.

use crate::result::Result;

/// A counting semaphore.
pub struct Semaphore {
    inner: corewait_sys::Semaphore,
}

/// Effectively unbounded: this ergonomic wrapper never exposes a separate
/// ceiling parameter, so the only thing that can exhaust it is acquiring
/// more permits than the platform can represent.
const CEILING: u32 = i32::MAX as u32;

impl Semaphore {
    /// Creates a new semaphore with `permits` initially available.
    pub fn new(permits: u32) -> Result<Self> {
        Ok(Self {
            inner: corewait_sys::Semaphore::new(permits, CEILING)?,
        })
    }

    /// Acquires a permit, blocking until one is available.
    ///
    /// # Panics
    ///
    /// Panics if the underlying OS primitive reports an error; see
    /// [`Mutex::lock`](crate::Mutex::lock) for why this type panics rather
    /// than threading a `Result` through. The underlying error is logged via
    /// `tracing` before the panic.
    pub fn acquire(&self) -> SemaphorePermit<'_> {
        self.inner
            .wait()
            .expect("corewait-sys semaphore wait failed; see logs for the OS error");
        SemaphorePermit { sem: self }
    }

    /// Acquires a permit without blocking, returning `None` if none are
    /// currently available.
    pub fn try_acquire(&self) -> Option<SemaphorePermit<'_>> {
        if self.inner.try_wait() {
            Some(SemaphorePermit { sem: self })
        } else {
            None
        }
    }

    /// Adds a permit without acquiring one, as if a held permit had just
    /// been released. Useful for seeding a semaphore used as a signal
    /// rather than a resource pool.
    pub fn add_permit(&self) {
        if let Err(err) = self.inner.signal(1) {
            tracing::error!(?err, "semaphore permit ceiling exceeded");
        }
    }
}

/// An acquired permit. Released back to the semaphore on drop.
#[must_use = "if unused the permit is immediately released"]
pub struct SemaphorePermit<'a> {
    sem: &'a Semaphore,
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.sem.inner.signal(1) {
            tracing::error!(?err, "semaphore permit ceiling exceeded on release");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn try_acquire_fails_when_empty() {
        let sem = Semaphore::new(0).unwrap();
        assert!(sem.try_acquire().is_none());
    }

    #[test]
    fn permit_release_on_drop_unblocks_waiter() {
        let sem = Arc::new(Semaphore::new(1).unwrap());
        let permit = sem.acquire();

        let waiter = Arc::clone(&sem);
        let handle = thread::spawn(move || waiter.acquire());

        thread::sleep(Duration::from_millis(50));
        drop(permit);
        handle.join().unwrap();
    }
}
