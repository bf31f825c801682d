//! FFI bindings for the raw auto-reset event.

use super::Status;
use crate::event::Event;

/// Allocates and initializes an event, writing the handle to `*out`.
///
/// # Safety
///
/// `out` must be valid and properly aligned for a write of `*mut Event`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__event_init(out: *mut *mut Event) -> Status {
    match Event::new() {
        Ok(event) => {
            unsafe { out.write(Box::into_raw(Box::new(event))) };
            Status::Ok
        }
        Err(err) => err.into(),
    }
}

/// Destroys an event previously created by [`__corewait_sys__event_init`].
///
/// # Safety
///
/// `event` must be a handle returned by `__corewait_sys__event_init` and not
/// already finalized.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__event_finalize(event: *mut Event) {
    drop(unsafe { Box::from_raw(event) });
}

/// Sets the event, releasing one waiter and resetting.
///
/// # Safety
///
/// `event` must be a live handle from `__corewait_sys__event_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__event_set(event: *mut Event) {
    unsafe { &*event }.set();
}

/// Blocks until the event is set, then consumes the signal.
///
/// # Safety
///
/// `event` must be a live handle from `__corewait_sys__event_init`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __corewait_sys__event_wait(event: *mut Event) {
    unsafe { &*event }.wait();
}
