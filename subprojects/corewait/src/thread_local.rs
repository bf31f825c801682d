//! An ergonomic, typed thread-local cell over [`corewait_tls::Slot`].
//!
//! The backing slot registers no destructor (see [`corewait_tls`]), so a
//! per-thread value allocated here is leaked if the thread exits without
//! the value being explicitly taken first. This mirrors the source this
//! workspace generalizes, which creates its pthreads key with a null
//! destructor and leaves cleanup to the caller.

use std::ffi::c_void;

use corewait_tls::Slot;

use crate::result::Result;

/// A per-thread cell holding a lazily-initialized `T`.
pub struct ThreadLocal<T> {
    slot: Slot,
    init: fn() -> T,
}

unsafe impl<T: Send> Sync for ThreadLocal<T> {}

impl<T: 'static> ThreadLocal<T> {
    /// Creates a new thread-local cell. `init` is called at most once per
    /// thread, the first time that thread calls [`with`](Self::with).
    pub fn new(init: fn() -> T) -> Result<Self> {
        Ok(Self {
            slot: Slot::new()?,
            init,
        })
    }

    /// Runs `f` against this thread's value, initializing it first if this
    /// is the first access from the calling thread.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let existing = self.slot.get() as *mut T;
        let ptr = if existing.is_null() {
            let boxed = Box::into_raw(Box::new((self.init)()));
            if let Err(err) = self.slot.set(boxed as *mut c_void) {
                tracing::error!(?err, "thread-local slot set failed");
            }
            boxed
        } else {
            existing
        };
        f(unsafe { &*ptr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn each_thread_gets_its_own_value() {
        let tls: Arc<ThreadLocal<Cell<i32>>> = Arc::new(ThreadLocal::new(|| Cell::new(0)).unwrap());

        let a = Arc::clone(&tls);
        let t1 = thread::spawn(move || {
            a.with(|c| c.set(1));
            a.with(|c| c.get())
        });

        let b = Arc::clone(&tls);
        let t2 = thread::spawn(move || {
            b.with(|c| c.set(2));
            b.with(|c| c.get())
        });

        assert_eq!(t1.join().unwrap(), 1);
        assert_eq!(t2.join().unwrap(), 2);
    }

    #[test]
    fn value_persists_across_accesses_on_same_thread() {
        let tls = ThreadLocal::new(|| Cell::new(0)).unwrap();
        tls.with(|c| c.set(7));
        assert_eq!(tls.with(|c| c.get()), 7);
    }
}
