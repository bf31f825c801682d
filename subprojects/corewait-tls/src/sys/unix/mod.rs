//! pthreads-backed thread-local slot key
//!
//! No destructor is registered with `pthread_key_create`: ownership of
//! whatever is stored in the slot is the caller's problem, matching the
//! source this crate generalizes, which passes `NULL` as the destructor.
//!
//! # References
//!
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/pthread_key_create.html>

use std::ffi::c_void;

use libc::{pthread_getspecific, pthread_key_create, pthread_key_delete, pthread_key_t, pthread_setspecific};

use crate::error::{unexpected_os_error, Error, Result};

pub struct Key {
    key: pthread_key_t,
}

unsafe impl Send for Key {}
unsafe impl Sync for Key {}

impl Key {
    pub fn new() -> Result<Self> {
        let mut key: pthread_key_t = 0;
        let rc = unsafe { pthread_key_create(&mut key, None) };
        if rc != 0 {
            return Err(match rc {
                libc::EAGAIN => Error::ResourceUnavailable,
                libc::ENOMEM => Error::NoMem,
                _ => unexpected_os_error("pthread_key_create"),
            });
        }
        Ok(Self { key })
    }

    pub fn set(&self, value: *mut c_void) -> Result<()> {
        let rc = unsafe { pthread_setspecific(self.key, value) };
        if rc != 0 {
            return Err(unexpected_os_error("pthread_setspecific"));
        }
        Ok(())
    }

    pub fn get(&self) -> *mut c_void {
        unsafe { pthread_getspecific(self.key) }
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        let rc = unsafe { pthread_key_delete(self.key) };
        debug_assert_eq!(rc, 0, "pthread_key_delete failed, invalid key?");
    }
}
