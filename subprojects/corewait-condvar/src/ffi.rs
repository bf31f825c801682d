//! C ABI surface (opt-in via the `ffi` feature).

use corewait_sys::Mutex;

use crate::condvar::Condvar;
use crate::error::Error;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    NoMem = 1,
    ResourceUnavailable = 2,
    UsageError = 3,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::NoMem => Status::NoMem,
            Error::ResourceUnavailable => Status::ResourceUnavailable,
            Error::Usage(_) => Status::UsageError,
        }
    }
}

impl From<crate::error::Result<()>> for Status {
    fn from(result: crate::error::Result<()>) -> Self {
        match result {
            Ok(()) => Status::Ok,
            Err(err) => err.into(),
        }
    }
}

/// Allocates and initializes a condition variable, writing the handle to
/// `*out`.
///
/// # Safety
///
/// `out` must be valid and properly aligned for a write of `*mut Condvar`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_condvar__init(out: *mut *mut Condvar) -> Status {
    match Condvar::new() {
        Ok(cond) => {
            unsafe { out.write(Box::into_raw(Box::new(cond))) };
            Status::Ok
        }
        Err(err) => err.into(),
    }
}

/// Destroys a condition variable previously created by
/// [`__corewait_condvar__init`].
///
/// # Safety
///
/// `cond` must be a handle returned by `__corewait_condvar__init` and not
/// already finalized. Calling this while a thread is parked in `wait` on
/// `cond` is a usage error the contract leaves undefined.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_condvar__finalize(cond: *mut Condvar) {
    drop(unsafe { Box::from_raw(cond) });
}

/// Atomically unlocks `mutex` and blocks until woken, then re-locks
/// `mutex` before returning.
///
/// # Safety
///
/// `cond` and `mutex` must be live handles; `mutex` must be locked by the
/// calling thread.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_condvar__wait(
    cond: *mut Condvar,
    mutex: *mut Mutex,
) -> Status {
    unsafe { &*cond }.wait(unsafe { &*mutex }).into()
}

/// Wakes one waiting thread, if any.
///
/// # Safety
///
/// `cond` must be a live handle from `__corewait_condvar__init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_condvar__signal(cond: *mut Condvar) {
    unsafe { &*cond }.signal();
}

/// Wakes all waiting threads.
///
/// # Safety
///
/// `cond` must be a live handle from `__corewait_condvar__init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_condvar__broadcast(cond: *mut Condvar) {
    unsafe { &*cond }.broadcast();
}
