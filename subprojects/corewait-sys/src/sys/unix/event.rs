//! Auto-reset event
//!
//! Mirrors a Win32 auto-reset `CreateEventW` object on top of the
//! `pthread_mutex_t` + `pthread_cond_t` pair: a guarded boolean flag, where
//! `set` wakes exactly one waiter and clears the flag on the way out.

use std::cell::UnsafeCell;

use libc::{
    pthread_cond_destroy, pthread_cond_init, pthread_cond_signal, pthread_cond_t,
    pthread_cond_wait, pthread_mutex_destroy, pthread_mutex_init, pthread_mutex_lock,
    pthread_mutex_t, pthread_mutex_unlock,
};

use crate::error::{unexpected_os_error, Error, Result};

struct Inner {
    mutex: pthread_mutex_t,
    condvar: pthread_cond_t,
    set: bool,
}

pub struct Event {
    inner: UnsafeCell<Inner>,
}

unsafe impl Send for Event {}
unsafe impl Sync for Event {}

impl Event {
    pub fn new() -> Result<Self> {
        let mut mutex: pthread_mutex_t = unsafe { std::mem::zeroed() };
        let rc = unsafe { pthread_mutex_init(&mut mutex, std::ptr::null()) };
        if rc != 0 {
            return Err(Error::NoMem);
        }

        let mut condvar: pthread_cond_t = unsafe { std::mem::zeroed() };
        let rc = unsafe { pthread_cond_init(&mut condvar, std::ptr::null()) };
        if rc != 0 {
            unsafe { pthread_mutex_destroy(&mut mutex) };
            return Err(match rc {
                libc::ENOMEM => Error::NoMem,
                libc::EAGAIN => Error::ResourceUnavailable,
                _ => unexpected_os_error("pthread_cond_init"),
            });
        }

        Ok(Self {
            inner: UnsafeCell::new(Inner {
                mutex,
                condvar,
                set: false,
            }),
        })
    }

    /// Sets the flag. If a waiter is parked, exactly one is released and
    /// the flag is left clear; a `set` with no waiters leaves the flag set
    /// for the next `wait` to consume. Concurrent `set`s before any `wait`
    /// coalesce: the flag has no count, only a bit.
    pub fn set(&self) {
        let inner = unsafe { &mut *self.inner.get() };
        unsafe { pthread_mutex_lock(&mut inner.mutex) };
        inner.set = true;
        unsafe { pthread_cond_signal(&mut inner.condvar) };
        unsafe { pthread_mutex_unlock(&mut inner.mutex) };
    }

    pub fn wait(&self) {
        let inner = unsafe { &mut *self.inner.get() };
        unsafe { pthread_mutex_lock(&mut inner.mutex) };
        while !inner.set {
            let rc = unsafe { pthread_cond_wait(&mut inner.condvar, &mut inner.mutex) };
            if rc != 0 {
                unexpected_os_error("pthread_cond_wait");
                break;
            }
        }
        inner.set = false;
        unsafe { pthread_mutex_unlock(&mut inner.mutex) };
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        unsafe {
            pthread_cond_destroy(&mut inner.condvar);
            pthread_mutex_destroy(&mut inner.mutex);
        }
    }
}
