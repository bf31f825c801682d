//! Counting semaphore with an explicit ceiling
//!
//! POSIX unnamed semaphores (`sem_t`) don't expose a way to query or cap
//! the maximum count, and bulk `sem_post(n)` doesn't exist. Rather than
//! approximate the ceiling check, this backend is built the way the
//! pthreads fallback of the source it generalizes builds it: a
//! `pthread_mutex_t` guarding a plain counter, with `pthread_cond_t` used
//! to park waiters while the counter is zero.
//!
//! # References
//!
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/pthread_cond_wait.html>

use std::cell::UnsafeCell;

use libc::{
    pthread_cond_broadcast, pthread_cond_destroy, pthread_cond_init, pthread_cond_signal,
    pthread_cond_t, pthread_cond_wait, pthread_mutex_destroy, pthread_mutex_init,
    pthread_mutex_lock, pthread_mutex_t, pthread_mutex_unlock,
};

use crate::error::{unexpected_os_error, Error, Result};

struct Inner {
    mutex: pthread_mutex_t,
    can_pass: pthread_cond_t,
    count: u32,
}

pub struct Semaphore {
    inner: UnsafeCell<Inner>,
    ceiling: u32,
}

unsafe impl Send for Semaphore {}
unsafe impl Sync for Semaphore {}

impl Semaphore {
    pub fn new(init_count: u32, ceiling: u32) -> Result<Self> {
        if init_count > ceiling {
            return Err(Error::Usage("semaphore init_count exceeds ceiling"));
        }

        let mut mutex: pthread_mutex_t = unsafe { std::mem::zeroed() };
        let rc = unsafe { pthread_mutex_init(&mut mutex, std::ptr::null()) };
        if rc != 0 {
            return Err(Error::NoMem);
        }

        let mut can_pass: pthread_cond_t = unsafe { std::mem::zeroed() };
        let rc = unsafe { pthread_cond_init(&mut can_pass, std::ptr::null()) };
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
                can_pass,
                count: init_count,
            }),
            ceiling,
        })
    }

    pub fn wait(&self) -> Result<()> {
        let inner = unsafe { &mut *self.inner.get() };
        unsafe { pthread_mutex_lock(&mut inner.mutex) };
        let mut result = Ok(());
        while inner.count == 0 {
            let rc = unsafe { pthread_cond_wait(&mut inner.can_pass, &mut inner.mutex) };
            if rc != 0 {
                result = Err(unexpected_os_error("pthread_cond_wait"));
                break;
            }
        }
        if result.is_ok() {
            inner.count -= 1;
        }
        unsafe { pthread_mutex_unlock(&mut inner.mutex) };
        result
    }

    pub fn try_wait(&self) -> bool {
        let inner = unsafe { &mut *self.inner.get() };
        unsafe { pthread_mutex_lock(&mut inner.mutex) };
        let acquired = if inner.count > 0 {
            inner.count -= 1;
            true
        } else {
            false
        };
        unsafe { pthread_mutex_unlock(&mut inner.mutex) };
        acquired
    }

    /// Raises the counter by `n`, failing if that would exceed the ceiling.
    pub fn signal(&self, n: u32) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        let inner = unsafe { &mut *self.inner.get() };
        unsafe { pthread_mutex_lock(&mut inner.mutex) };
        let exceeds_ceiling = match inner.count.checked_add(n) {
            Some(sum) => sum > self.ceiling,
            None => true,
        };
        if exceeds_ceiling {
            unsafe { pthread_mutex_unlock(&mut inner.mutex) };
            return Err(Error::ResourceUnavailable);
        }
        inner.count += n;
        if n == 1 {
            unsafe { pthread_cond_signal(&mut inner.can_pass) };
        } else {
            unsafe { pthread_cond_broadcast(&mut inner.can_pass) };
        }
        unsafe { pthread_mutex_unlock(&mut inner.mutex) };
        Ok(())
    }
}

impl Drop for Semaphore {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        unsafe {
            pthread_cond_destroy(&mut inner.can_pass);
            pthread_mutex_destroy(&mut inner.mutex);
        }
    }
}
