//! FFI bindings for the raw semaphore.

use super::Status;
use crate::semaphore::Semaphore;

/// Allocates and initializes a semaphore, writing the handle to `*out`.
///
/// # Safety
///
/// `out` must be valid and properly aligned for a write of `*mut Semaphore`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__semaphore_init(
    init_count: u32,
    ceiling: u32,
    out: *mut *mut Semaphore,
) -> Status {
    match Semaphore::new(init_count, ceiling) {
        Ok(sem) => {
            unsafe { out.write(Box::into_raw(Box::new(sem))) };
            Status::Ok
        }
        Err(err) => err.into(),
    }
}

/// Destroys a semaphore previously created by
/// [`__corewait_sys__semaphore_init`].
///
/// # Safety
///
/// `sem` must be a handle returned by `__corewait_sys__semaphore_init` and
/// not already finalized.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__semaphore_finalize(sem: *mut Semaphore) {
    drop(unsafe { Box::from_raw(sem) });
}

/// Blocks until a permit is available, then consumes it.
///
/// # Safety
///
/// `sem` must be a live handle from `__corewait_sys__semaphore_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__semaphore_wait(sem: *mut Semaphore) -> Status {
    unsafe { &*sem }.wait().into()
}

/// Consumes a permit only if one is immediately available.
///
/// # Safety
///
/// `sem` must be a live handle from `__corewait_sys__semaphore_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__semaphore_try_wait(sem: *mut Semaphore) -> bool {
    unsafe { &*sem }.try_wait()
}

/// Releases `n` permits, failing if doing so would exceed the ceiling fixed
/// at construction.
///
/// # Safety
///
/// `sem` must be a live handle from `__corewait_sys__semaphore_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__semaphore_signal(sem: *mut Semaphore, n: u32) -> Status {
    unsafe { &*sem }.signal(n).into()
}
