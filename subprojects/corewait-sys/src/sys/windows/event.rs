//! `CreateEventW`-backed auto-reset event
//!
//! Win32 natively supports auto-reset events (`bManualReset = FALSE`):
//! `SetEvent` releases exactly one waiter and the kernel clears the state
//! for us, so unlike the Unix backend this one needs no hand-rolled flag.
//!
//! # References
//!
//! - <https://learn.microsoft.com/en-us/windows/win32/api/synchapi/nf-synchapi-createeventw>

use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, HANDLE, WAIT_OBJECT_0};
use windows_sys::Win32::System::Threading::{CreateEventW, SetEvent, WaitForSingleObject, INFINITE};

use crate::error::{unexpected_os_error, Error, Result};

pub struct Event {
    handle: HANDLE,
}

unsafe impl Send for Event {}
unsafe impl Sync for Event {}

impl Event {
    pub fn new() -> Result<Self> {
        let handle = unsafe {
            CreateEventW(
                std::ptr::null(),
                0, /* bManualReset = FALSE: auto-reset */
                0, /* bInitialState = FALSE: initially clear */
                std::ptr::null(),
            )
        };
        if handle.is_null() {
            return Err(match unsafe { GetLastError() } {
                8 /* ERROR_NOT_ENOUGH_MEMORY */ => Error::NoMem,
                _ => Error::ResourceUnavailable,
            });
        }
        Ok(Self { handle })
    }

    pub fn set(&self) {
        let ok = unsafe { SetEvent(self.handle) };
        if ok == 0 {
            unexpected_os_error("SetEvent");
        }
    }

    pub fn wait(&self) {
        let rc = unsafe { WaitForSingleObject(self.handle, INFINITE) };
        if rc != WAIT_OBJECT_0 {
            unexpected_os_error("WaitForSingleObject(event)");
        }
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.handle) };
    }
}
