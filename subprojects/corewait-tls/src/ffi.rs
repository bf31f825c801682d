//! C ABI surface (opt-in via the `ffi` feature).

use std::ffi::c_void;

use crate::error::Error;
use crate::slot::Slot;

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

/// Allocates a thread-local slot, writing the handle to `*out`.
///
/// # Safety
///
/// `out` must be valid and properly aligned for a write of `*mut Slot`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_tls__slot_init(out: *mut *mut Slot) -> Status {
    match Slot::new() {
        Ok(slot) => {
            unsafe { out.write(Box::into_raw(Box::new(slot))) };
            Status::Ok
        }
        Err(err) => err.into(),
    }
}

/// Destroys a slot previously created by [`__corewait_tls__slot_init`].
///
/// # Safety
///
/// `slot` must be a handle returned by `__corewait_tls__slot_init` and not
/// already finalized.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_tls__slot_finalize(slot: *mut Slot) {
    drop(unsafe { Box::from_raw(slot) });
}

/// Sets the calling thread's value for `slot`.
///
/// # Safety
///
/// `slot` must be a live handle from `__corewait_tls__slot_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_tls__slot_set(slot: *mut Slot, value: *mut c_void) -> Status {
    unsafe { &*slot }.set(value).map_or_else(Status::from, |()| Status::Ok)
}

/// Returns the calling thread's value for `slot`, or null if unset.
///
/// # Safety
///
/// `slot` must be a live handle from `__corewait_tls__slot_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_tls__slot_get(slot: *mut Slot) -> *mut c_void {
    unsafe { &*slot }.get()
}
