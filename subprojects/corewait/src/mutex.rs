//! An ergonomic, `std`-shaped mutex over [`corewait_sys::Mutex`].

use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::result::{Result, TryLockError, TryLockResult};

/// A mutual-exclusion lock protecting data of type `T`.
///
/// The data can only be accessed through the RAII guard returned from
/// [`lock`](Mutex::lock) and [`try_lock`](Mutex::try_lock), which guarantee
/// the data is only ever touched while the underlying OS mutex is held.
pub struct Mutex<T: ?Sized> {
    inner: corewait_sys::Mutex,
    data: UnsafeCell<T>,
}

unsafe impl<T: ?Sized + Send> Send for Mutex<T> {}
unsafe impl<T: ?Sized + Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
    /// Creates a new mutex in an unlocked state ready for use.
    pub fn new(data: T) -> Result<Mutex<T>> {
        Ok(Mutex {
            inner: corewait_sys::Mutex::new()?,
            data: UnsafeCell::new(data),
        })
    }

    /// Consumes this mutex, returning the underlying data.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> Mutex<T> {
    /// Acquires the mutex, blocking the current thread until it is able to
    /// do so.
    ///
    /// The exact behavior of locking a mutex already held by the calling
    /// thread is left unspecified by the underlying `corewait-sys` backend;
    /// this mutex is not recursive.
    ///
    /// # Panics
    ///
    /// Panics if the underlying OS primitive reports an error. Unlike
    /// `std::sync::Mutex`, this type has no poisoning to propagate through a
    /// `Result`, so a failure here means the OS call itself misbehaved - a
    /// programming bug, not a recoverable condition. The underlying error is
    /// logged via `tracing` before the panic.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner
            .lock()
            .expect("corewait-sys mutex lock failed; see logs for the OS error");
        unsafe { MutexGuard::new(self) }
    }

    /// Attempts to acquire the mutex without blocking.
    pub fn try_lock(&self) -> TryLockResult<MutexGuard<'_, T>> {
        if self.inner.try_lock() {
            Ok(unsafe { MutexGuard::new(self) })
        } else {
            Err(TryLockError::WouldBlock)
        }
    }

    /// Returns a mutable reference to the underlying data.
    ///
    /// Since this borrows the `Mutex` mutably, no locking needs to take
    /// place: the mutable borrow statically guarantees no other access
    /// exists.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    /// Returns a raw pointer to the underlying data.
    ///
    /// Dereferencing it is unsafe: the compiler cannot verify the calling
    /// thread holds the lock.
    #[inline]
    pub fn data_ptr(&self) -> *mut T {
        self.data.get()
    }

    /// Forcibly unlocks the mutex, regardless of whether a [`MutexGuard`]
    /// is currently in scope.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold the lock, and no live
    /// `MutexGuard` for this mutex may exist (unless it was leaked via
    /// [`std::mem::forget`]).
    #[inline]
    pub unsafe fn force_unlock(&self) {
        self.inner
            .unlock()
            .expect("corewait-sys mutex unlock failed; see logs for the OS error");
    }

    pub(crate) fn raw(&self) -> &corewait_sys::Mutex {
        &self.inner
    }
}

impl<T: Default> Mutex<T> {
    /// Creates a `Mutex<T>` with the `Default` value for `T`.
    pub fn default() -> Result<Mutex<T>> {
        Mutex::new(T::default())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Mutex");
        match self.try_lock() {
            Ok(guard) => {
                d.field("data", &&*guard);
            }
            Err(TryLockError::WouldBlock) => {
                d.field("data", &format_args!("<locked>"));
            }
        }
        d.finish_non_exhaustive()
    }
}

/// An RAII guard granting exclusive access to the data protected by a
/// [`Mutex`]. Unlocks on drop.
#[must_use = "if unused the Mutex will immediately unlock"]
pub struct MutexGuard<'a, T: ?Sized> {
    lock: &'a Mutex<T>,
}

unsafe impl<T: ?Sized + Sync> Sync for MutexGuard<'_, T> {}

impl<'a, T: ?Sized> MutexGuard<'a, T> {
    unsafe fn new(lock: &'a Mutex<T>) -> MutexGuard<'a, T> {
        MutexGuard { lock }
    }
}

pub(crate) fn guard_mutex<'a, T: ?Sized>(guard: &MutexGuard<'a, T>) -> &'a Mutex<T> {
    guard.lock
}

impl<T: ?Sized> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T: ?Sized> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T: ?Sized> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        // Logged rather than panicking: unwinding out of a drop impl during
        // an existing unwind would abort the process.
        if let Err(err) = self.lock.inner.unlock() {
            tracing::error!(?err, "mutex unlock failed during guard drop");
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for MutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn lock_guards_the_data() {
        let m = Mutex::new(5).unwrap();
        {
            let mut guard = m.lock();
            *guard += 1;
        }
        assert_eq!(*m.lock(), 6);
    }

    #[test]
    fn try_lock_fails_while_held() {
        let m = Mutex::new(()).unwrap();
        let guard = m.lock();
        assert!(m.try_lock().is_err());
        drop(guard);
        assert!(m.try_lock().is_ok());
    }

    #[test]
    fn shared_across_threads() {
        let m = Arc::new(Mutex::new(0usize).unwrap());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let m = Arc::clone(&m);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    *m.lock() += 1;
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(*m.lock(), 8000);
    }
}
