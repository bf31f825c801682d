//! `CreateSemaphoreW`-backed counting semaphore
//!
//! Win32 semaphores natively carry a maximum count and reject a
//! `ReleaseSemaphore` that would exceed it, so this backend is a thin
//! wrapper rather than a hand-rolled counter.
//!
//! # References
//!
//! - <https://learn.microsoft.com/en-us/windows/win32/api/synchapi/nf-synchapi-createsemaphorew>
//! - <https://learn.microsoft.com/en-us/windows/win32/api/synchapi/nf-synchapi-releasesemaphore>

use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, HANDLE, WAIT_OBJECT_0};
use windows_sys::Win32::System::Threading::{
    CreateSemaphoreW, ReleaseSemaphore, WaitForSingleObject, INFINITE,
};

use crate::error::{unexpected_os_error, Error, Result};

pub struct Semaphore {
    handle: HANDLE,
}

unsafe impl Send for Semaphore {}
unsafe impl Sync for Semaphore {}

impl Semaphore {
    pub fn new(init_count: u32, ceiling: u32) -> Result<Self> {
        if init_count > ceiling {
            return Err(Error::Usage("semaphore init_count exceeds ceiling"));
        }
        if ceiling > i32::MAX as u32 {
            return Err(Error::Usage("semaphore ceiling exceeds i32::MAX"));
        }
        let handle = unsafe {
            CreateSemaphoreW(
                std::ptr::null(),
                init_count as i32,
                ceiling as i32,
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

    pub fn wait(&self) -> Result<()> {
        let rc = unsafe { WaitForSingleObject(self.handle, INFINITE) };
        if rc != WAIT_OBJECT_0 {
            return Err(unexpected_os_error("WaitForSingleObject(semaphore)"));
        }
        Ok(())
    }

    pub fn try_wait(&self) -> bool {
        unsafe { WaitForSingleObject(self.handle, 0) == WAIT_OBJECT_0 }
    }

    /// Raises the counter by `n`, failing if that would exceed the ceiling
    /// configured at construction.
    pub fn signal(&self, n: u32) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        if n > i32::MAX as u32 {
            return Err(Error::Usage("semaphore signal count exceeds i32::MAX"));
        }
        let ok = unsafe { ReleaseSemaphore(self.handle, n as i32, std::ptr::null_mut()) };
        if ok == 0 {
            return Err(Error::ResourceUnavailable);
        }
        Ok(())
    }
}

impl Drop for Semaphore {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.handle) };
    }
}
