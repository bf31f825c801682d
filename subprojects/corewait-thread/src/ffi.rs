//! C ABI surface (opt-in via the `ffi` feature).

use std::ffi::c_void;

use crate::error::Error;
use crate::raw_thread::{RawThread, ThreadFunc};

/// The outcomes a raw thread operation can produce, as a C-representable
/// status code.
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

/// Launches a thread running `thread_func(thread_func_context)`, writing
/// the handle to `*out`.
///
/// # Safety
///
/// `out` must be valid and properly aligned for a write of `*mut RawThread`.
/// `thread_func_context` must remain valid for the thread's lifetime.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_thread__launch(
    thread_func_context: *mut c_void,
    thread_func: ThreadFunc,
    out: *mut *mut RawThread,
) -> Status {
    match RawThread::launch(thread_func_context, thread_func) {
        Ok(thread) => {
            unsafe { out.write(Box::into_raw(Box::new(thread))) };
            Status::Ok
        }
        Err(err) => err.into(),
    }
}

/// Waits for the thread to stop and frees its OS resources, consuming
/// `thread`.
///
/// # Safety
///
/// `thread` must be a handle returned by `__corewait_thread__launch` and not
/// already joined.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_thread__join(thread: *mut RawThread) -> Status {
    let thread = unsafe { Box::from_raw(thread) };
    match thread.join() {
        Ok(()) => Status::Ok,
        Err(err) => err.into(),
    }
}

/// Yields the calling thread's remaining time slice.
#[unsafe(no_mangle)]
pub extern "C" fn __corewait_thread__yield_now() {
    crate::raw_thread::yield_now();
}
