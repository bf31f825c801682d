//! pthreads-backed raw thread
//!
//! Mental model: a thread is like a spaceship. After launch it must
//! explicitly land via `join` - skipping that leaves the kernel thread
//! object leaked and, on some platforms, the detached resources in an
//! undefined state.
//!
//! # References
//!
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/pthread_create.html>
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/pthread_join.html>

use std::ffi::c_void;

use libc::{pthread_create, pthread_join, pthread_t};

use crate::error::{unexpected_os_error, Error, Result};

pub struct RawThread {
    native: pthread_t,
}

unsafe impl Send for RawThread {}

impl RawThread {
    /// Launches a new thread running `entry(context)`.
    ///
    /// # Safety
    ///
    /// `context` must remain valid until `entry` has returned; `entry` must
    /// tolerate being called from a thread with no further setup.
    pub unsafe fn launch(
        context: *mut c_void,
        entry: extern "C" fn(*mut c_void) -> *mut c_void,
    ) -> Result<Self> {
        let mut native: pthread_t = unsafe { std::mem::zeroed() };
        let trampoline: extern "C" fn(*mut c_void) -> *mut c_void = entry;
        let rc = unsafe {
            pthread_create(
                &mut native,
                std::ptr::null(),
                std::mem::transmute::<
                    extern "C" fn(*mut c_void) -> *mut c_void,
                    unsafe extern "C" fn(*mut c_void) -> *mut c_void,
                >(trampoline),
                context,
            )
        };
        if rc != 0 {
            return Err(match rc {
                libc::EAGAIN => Error::ResourceUnavailable,
                libc::ENOMEM => Error::NoMem,
                _ => unexpected_os_error("pthread_create"),
            });
        }
        Ok(Self { native })
    }

    /// Blocks until the thread terminates, then releases its OS resources.
    pub fn join(self) -> Result<()> {
        let rc = unsafe { pthread_join(self.native, std::ptr::null_mut()) };
        if rc != 0 {
            return Err(unexpected_os_error("pthread_join"));
        }
        Ok(())
    }
}

pub fn yield_now() {
    unsafe {
        libc::sched_yield();
    }
}
