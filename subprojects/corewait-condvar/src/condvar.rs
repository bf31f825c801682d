//! Condition variable emulated from OS primitives that don't natively
//! offer one.
//!
//! Built from a counting semaphore, an auto-reset event and two mutexes,
//! following the classic emulation technique for building a POSIX-alike
//! condition variable out of Win32 synchronization objects. See
//! <http://www.cse.wustl.edu/~schmidt/win32-cv-1.html> for background on
//! the approach and the bugs in naive attempts at it - this implementation
//! follows the article's corrected design.
//!
//! # The gate and the drain handshake
//!
//! `gate_mutex` serializes `wait`'s "add myself to the waiting count" step
//! against `signal`/`broadcast`: no new waiter can join while a wake is in
//! progress, and only one wake is in progress at a time. `count_mutex`
//! guards `waiting_count` itself, since a woken waiter decrements it after
//! `gate_mutex` has already been released (to avoid holding the gate for
//! the full duration of every wait).
//!
//! `drain_event` is the handshake that lets `broadcast` block until every
//! thread it woke has actually left the semaphore wait and observed the
//! wakeup - without it, a broadcast could return (and the caller go on to
//! reuse or destroy the condition variable) while woken threads are still
//! mid-wakeup, racing a subsequent `wait` that re-adds itself to the count.
//! Only the *last* thread to wake from a given broadcast sets the event;
//! `signal`'s single woken thread always is that thread.
//!
//! # Non-goals
//!
//! No timed wait: the contract this type emulates doesn't require one, and
//! adding a timeout to the semaphore wait would require plumbing a deadline
//! through the drain handshake too, which the source this crate
//! generalizes explicitly leaves as a TODO rather than a solved problem.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use corewait_sys::{Event, Mutex, Semaphore};

use crate::error::{unexpected_os_error, Result};

/// A condition variable usable with any [`corewait_sys::Mutex`].
///
/// Unlike `std::sync::Condvar`, this type is not tied to a single mutex at
/// the type level; the caller passes the mutex it holds locked into
/// [`Condvar::wait`] each time, matching the contract this type emulates.
pub struct Condvar {
    gate_mutex: Mutex,
    count_mutex: Mutex,
    wake_semaphore: Semaphore,
    drain_event: Event,
    waiting_count: AtomicU32,
    broadcast_active: AtomicBool,
}

/// Ample headroom under the semaphore's ceiling for the assumption, shared
/// with the source this crate generalizes, that fewer threads exist than
/// the platform's maximum semaphore count.
const WAKE_SEMAPHORE_CEILING: u32 = i32::MAX as u32;

impl Condvar {
    /// Creates a new condition variable with no threads waiting.
    pub fn new() -> Result<Self> {
        Ok(Self {
            gate_mutex: Mutex::new()?,
            count_mutex: Mutex::new()?,
            wake_semaphore: Semaphore::new(0, WAKE_SEMAPHORE_CEILING)?,
            drain_event: Event::new()?,
            waiting_count: AtomicU32::new(0),
            broadcast_active: AtomicBool::new(false),
        })
    }

    /// Atomically unlocks `mutex` and blocks the calling thread until
    /// woken by [`Condvar::signal`] or [`Condvar::broadcast`], then
    /// re-locks `mutex` before returning.
    ///
    /// `mutex` must be locked by the calling thread when this is called;
    /// calling it otherwise is a usage error with undefined behavior, the
    /// same contract `pthread_cond_wait` places on its callers.
    ///
    /// Spurious wakeups don't occur in this emulation: every return from
    /// `wait` corresponds to a `signal` or `broadcast` that targeted this
    /// waiter. Callers should still re-check their predicate in a loop, as
    /// the classic condition-variable usage pattern requires, since the
    /// predicate may have changed again before this thread got scheduled.
    ///
    /// Returns [`Error::Usage`](crate::error::Error::Usage) if one of the
    /// internal OS primitive calls this emulation depends on fails; this
    /// should never happen outside of a programming error (e.g. `mutex` not
    /// actually held by the caller), and the underlying OS error is logged
    /// via `tracing` before this returns. Any of the internal steps failing
    /// leaves the condition variable's state undefined by contract, same as
    /// the other failure modes this crate documents.
    pub fn wait(&self, mutex: &Mutex) -> Result<()> {
        self.gate_mutex
            .lock()
            .map_err(|_| unexpected_os_error("condvar wait: lock gate"))?;
        self.waiting_count.fetch_add(1, Ordering::Relaxed);
        mutex
            .unlock()
            .map_err(|_| unexpected_os_error("condvar wait: unlock caller mutex"))?;
        self.gate_mutex
            .unlock()
            .map_err(|_| unexpected_os_error("condvar wait: unlock gate"))?;

        // Parked here until signal/broadcast releases a permit. No lock is
        // held across this wait, matching the "don't hold the gate for the
        // duration of every sleep" design the emulation depends on for
        // concurrent signals to make progress.
        self.wake_semaphore
            .wait()
            .map_err(|_| unexpected_os_error("condvar wait: wake semaphore"))?;

        self.count_mutex
            .lock()
            .map_err(|_| unexpected_os_error("condvar wait: lock count"))?;
        let remaining = self.waiting_count.fetch_sub(1, Ordering::Relaxed) - 1;
        self.count_mutex
            .unlock()
            .map_err(|_| unexpected_os_error("condvar wait: unlock count"))?;

        let broadcast_in_progress = self.broadcast_active.load(Ordering::Relaxed);
        let all_awake = !(broadcast_in_progress && remaining > 0);
        if all_awake {
            // Last thread out tells broadcast/signal it's safe to return.
            self.drain_event.set();
        }

        mutex
            .lock()
            .map_err(|_| unexpected_os_error("condvar wait: relock caller mutex"))?;
        Ok(())
    }

    /// Wakes one waiting thread, if any, and blocks until that thread has
    /// finished leaving the semaphore wait.
    pub fn signal(&self) {
        if let Err(err) = self.gate_mutex.lock() {
            tracing::error!(?err, "condvar gate lock failed");
            return;
        }

        if self.waiting_count.load(Ordering::Relaxed) > 0 {
            if let Err(err) = self.wake_semaphore.signal(1) {
                tracing::error!(?err, "condvar wake semaphore signal failed");
            }
            self.drain_event.wait();
        }

        if let Err(err) = self.gate_mutex.unlock() {
            tracing::error!(?err, "condvar gate unlock failed");
        }
    }

    /// Wakes all waiting threads and blocks until every one of them has
    /// finished leaving the semaphore wait.
    pub fn broadcast(&self) {
        if let Err(err) = self.gate_mutex.lock() {
            tracing::error!(?err, "condvar gate lock failed");
            return;
        }

        let waiting_count = self.waiting_count.load(Ordering::Relaxed);
        if waiting_count > 0 {
            self.broadcast_active.store(true, Ordering::Relaxed);

            // Releasing the semaphore here and then waiting on the drain
            // event publishes `broadcast_active = true` to the waiters we
            // just woke, since each one only checks the flag after its own
            // wake_semaphore.wait() returns.
            if let Err(err) = self.wake_semaphore.signal(waiting_count) {
                tracing::error!(?err, "condvar wake semaphore signal failed");
            }
            self.drain_event.wait();

            self.broadcast_active.store(false, Ordering::Relaxed);
        }

        if let Err(err) = self.gate_mutex.unlock() {
            tracing::error!(?err, "condvar gate unlock failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    struct Shared {
        mutex: Mutex,
        condvar: Condvar,
        ready: std::cell::UnsafeCell<bool>,
    }

    unsafe impl Send for Shared {}
    unsafe impl Sync for Shared {}

    #[test]
    fn signal_wakes_a_single_waiter() {
        let shared = Arc::new(Shared {
            mutex: Mutex::new().unwrap(),
            condvar: Condvar::new().unwrap(),
            ready: std::cell::UnsafeCell::new(false),
        });

        let waiter = Arc::clone(&shared);
        let handle = thread::spawn(move || {
            waiter.mutex.lock().unwrap();
            while unsafe { !*waiter.ready.get() } {
                waiter.condvar.wait(&waiter.mutex).unwrap();
            }
            waiter.mutex.unlock().unwrap();
        });

        thread::sleep(Duration::from_millis(50));
        shared.mutex.lock().unwrap();
        unsafe { *shared.ready.get() = true };
        shared.mutex.unlock().unwrap();
        shared.condvar.signal();

        handle.join().unwrap();
    }

    #[test]
    fn broadcast_wakes_all_waiters() {
        let shared = Arc::new(Shared {
            mutex: Mutex::new().unwrap(),
            condvar: Condvar::new().unwrap(),
            ready: std::cell::UnsafeCell::new(false),
        });

        let mut handles = Vec::new();
        for _ in 0..8 {
            let waiter = Arc::clone(&shared);
            handles.push(thread::spawn(move || {
                waiter.mutex.lock().unwrap();
                while unsafe { !*waiter.ready.get() } {
                    waiter.condvar.wait(&waiter.mutex).unwrap();
                }
                waiter.mutex.unlock().unwrap();
            }));
        }

        thread::sleep(Duration::from_millis(50));
        shared.mutex.lock().unwrap();
        unsafe { *shared.ready.get() = true };
        shared.mutex.unlock().unwrap();
        shared.condvar.broadcast();

        for h in handles {
            h.join().unwrap();
        }
    }

    #[test]
    fn signal_with_no_waiters_returns_immediately() {
        let condvar = Condvar::new().unwrap();
        condvar.signal();
        condvar.broadcast();
    }
}
