//! FFI bindings for the raw mutex.

use super::Status;
use crate::mutex::Mutex;

/// Allocates and initializes a mutex, writing the handle to `*out`.
///
/// # Safety
///
/// `out` must be valid and properly aligned for a write of `*mut Mutex`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__mutex_init(out: *mut *mut Mutex) -> Status {
    match Mutex::new() {
        Ok(mutex) => {
            unsafe { out.write(Box::into_raw(Box::new(mutex))) };
            Status::Ok
        }
        Err(err) => err.into(),
    }
}

/// Destroys a mutex previously created by [`__corewait_sys__mutex_init`].
///
/// # Safety
///
/// `mutex` must be a handle returned by `__corewait_sys__mutex_init` and not
/// already finalized.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__mutex_finalize(mutex: *mut Mutex) {
    drop(unsafe { Box::from_raw(mutex) });
}

/// Blocks until the mutex is acquired.
///
/// # Safety
///
/// `mutex` must be a live handle from `__corewait_sys__mutex_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__mutex_lock(mutex: *mut Mutex) -> Status {
    unsafe { &*mutex }.lock().into()
}

/// Attempts to acquire the mutex without blocking.
///
/// # Safety
///
/// `mutex` must be a live handle from `__corewait_sys__mutex_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__mutex_try_lock(mutex: *mut Mutex) -> bool {
    unsafe { &*mutex }.try_lock()
}

/// Releases the mutex.
///
/// # Safety
///
/// `mutex` must be a live handle from `__corewait_sys__mutex_init`, held by
/// the calling thread.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__mutex_unlock(mutex: *mut Mutex) -> Status {
    unsafe { &*mutex }.unlock().into()
}
