//! Win32-backed thread-local slot key
//!
//! # References
//!
//! - <https://learn.microsoft.com/en-us/windows/win32/api/processthreadsapi/nf-processthreadsapi-tlsalloc>

use std::ffi::c_void;

use windows_sys::Win32::Foundation::GetLastError;
use windows_sys::Win32::System::Threading::{TlsAlloc, TlsFree, TlsGetValue, TlsSetValue, TLS_OUT_OF_INDEXES};

use crate::error::{unexpected_os_error, Error, Result};

pub struct Key {
    index: u32,
}

unsafe impl Send for Key {}
unsafe impl Sync for Key {}

impl Key {
    pub fn new() -> Result<Self> {
        let index = unsafe { TlsAlloc() };
        if index == TLS_OUT_OF_INDEXES {
            return Err(match unsafe { GetLastError() } {
                8 /* ERROR_NOT_ENOUGH_MEMORY */ => Error::NoMem,
                _ => Error::ResourceUnavailable,
            });
        }
        Ok(Self { index })
    }

    pub fn set(&self, value: *mut c_void) -> Result<()> {
        let ok = unsafe { TlsSetValue(self.index, value) };
        if ok == 0 {
            return Err(unexpected_os_error("TlsSetValue"));
        }
        Ok(())
    }

    pub fn get(&self) -> *mut c_void {
        unsafe { TlsGetValue(self.index) }
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        let ok = unsafe { TlsFree(self.index) };
        debug_assert_ne!(ok, 0, "TlsFree failed, invalid index?");
    }
}
