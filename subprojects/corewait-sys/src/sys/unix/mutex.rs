//! pthreads-backed mutex
//!
//! # References
//!
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/pthread_mutex_lock.html>
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/pthread_mutex_init.html>

use std::cell::UnsafeCell;

use libc::{
    pthread_mutex_destroy, pthread_mutex_init, pthread_mutex_lock, pthread_mutex_t,
    pthread_mutex_trylock, pthread_mutex_unlock, pthread_mutexattr_destroy, pthread_mutexattr_init,
    pthread_mutexattr_settype, pthread_mutexattr_t, PTHREAD_MUTEX_ERRORCHECK,
};

use crate::error::{unexpected_os_error, Error, Result};

/// A non-recursive mutex backed by `pthread_mutex_t`.
///
/// Built with the `PTHREAD_MUTEX_ERRORCHECK` type so that a recursive lock
/// or an unlock from a non-owner thread is reported by the kernel instead
/// of silently deadlocking or corrupting state — the contract calls both
/// usage errors, and this lets release builds observe them as
/// [`Error::Usage`] rather than hanging forever.
pub struct Mutex {
    raw: UnsafeCell<pthread_mutex_t>,
}

unsafe impl Send for Mutex {}
unsafe impl Sync for Mutex {}

impl Mutex {
    pub fn new() -> Result<Self> {
        let mut attr: pthread_mutexattr_t = unsafe { std::mem::zeroed() };
        let rc = unsafe { pthread_mutexattr_init(&mut attr) };
        if rc != 0 {
            return Err(Error::NoMem);
        }
        unsafe { pthread_mutexattr_settype(&mut attr, PTHREAD_MUTEX_ERRORCHECK) };

        let mut raw: pthread_mutex_t = unsafe { std::mem::zeroed() };
        let rc = unsafe { pthread_mutex_init(&mut raw, &attr) };
        unsafe { pthread_mutexattr_destroy(&mut attr) };

        if rc != 0 {
            return Err(match rc {
                libc::ENOMEM => Error::NoMem,
                libc::EAGAIN => Error::ResourceUnavailable,
                _ => unexpected_os_error("pthread_mutex_init"),
            });
        }

        Ok(Self {
            raw: UnsafeCell::new(raw),
        })
    }

    #[inline]
    pub fn lock(&self) -> Result<()> {
        let rc = unsafe { pthread_mutex_lock(self.raw.get()) };
        if rc != 0 {
            return Err(unexpected_os_error("pthread_mutex_lock"));
        }
        Ok(())
    }

    #[inline]
    pub fn try_lock(&self) -> bool {
        unsafe { pthread_mutex_trylock(self.raw.get()) == 0 }
    }

    #[inline]
    pub fn unlock(&self) -> Result<()> {
        let rc = unsafe { pthread_mutex_unlock(self.raw.get()) };
        if rc != 0 {
            return Err(unexpected_os_error("pthread_mutex_unlock"));
        }
        Ok(())
    }
}

impl Drop for Mutex {
    fn drop(&mut self) {
        let rc = unsafe { pthread_mutex_destroy(self.raw.get()) };
        debug_assert_eq!(rc, 0, "pthread_mutex_destroy failed, waiters present?");
    }
}
