//! Win32-backed raw thread
//!
//! # References
//!
//! - <https://learn.microsoft.com/en-us/windows/win32/procthread/creating-threads>
//! - <https://learn.microsoft.com/en-us/windows/win32/api/synchapi/nf-synchapi-waitforsingleobject>

use std::ffi::c_void;

use windows_sys::Win32::Foundation::{CloseHandle, WAIT_OBJECT_0};
use windows_sys::Win32::System::Threading::{
    CreateThread, SwitchToThread, WaitForSingleObject, INFINITE,
};

use crate::error::{unexpected_os_error, Error, Result};

pub struct RawThread {
    handle: windows_sys::Win32::Foundation::HANDLE,
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
        entry: extern "system" fn(*mut c_void) -> u32,
    ) -> Result<Self> {
        let mut thread_id: u32 = 0;
        let handle = unsafe {
            CreateThread(
                std::ptr::null(),
                0,
                Some(entry),
                context,
                0,
                &mut thread_id,
            )
        };
        if handle.is_null() {
            return Err(Error::ResourceUnavailable);
        }
        Ok(Self { handle })
    }

    /// Blocks until the thread terminates, then releases its OS resources.
    pub fn join(self) -> Result<()> {
        let rc = unsafe { WaitForSingleObject(self.handle, INFINITE) };
        let result = if rc == WAIT_OBJECT_0 {
            Ok(())
        } else {
            Err(unexpected_os_error("WaitForSingleObject(thread)"))
        };
        unsafe { CloseHandle(self.handle) };
        result
    }
}

pub fn yield_now() {
    unsafe {
        SwitchToThread();
    }
}
