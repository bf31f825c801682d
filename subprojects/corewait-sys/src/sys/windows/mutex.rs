//! `CRITICAL_SECTION`-backed mutex
//!
//! # References
//!
//! - <https://learn.microsoft.com/en-us/windows/win32/sync/critical-section-objects>

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

use windows_sys::Win32::System::Threading::{
    DeleteCriticalSection, EnterCriticalSection, InitializeCriticalSectionAndSpinCount,
    LeaveCriticalSection, TryEnterCriticalSection, CRITICAL_SECTION,
};

use crate::error::{Error, Result};

/// Default spin count before a `CRITICAL_SECTION` falls back to blocking,
/// matching the value the source this crate generalizes uses for its
/// internal mutexes.
const DEFAULT_SPIN_COUNT: u32 = 4000;

pub struct Mutex {
    raw: UnsafeCell<CRITICAL_SECTION>,
}

unsafe impl Send for Mutex {}
unsafe impl Sync for Mutex {}

impl Mutex {
    pub fn new() -> Result<Self> {
        let mut raw = MaybeUninit::<CRITICAL_SECTION>::uninit();
        let ok =
            unsafe { InitializeCriticalSectionAndSpinCount(raw.as_mut_ptr(), DEFAULT_SPIN_COUNT) };
        if ok == 0 {
            return Err(Error::NoMem);
        }
        Ok(Self {
            raw: UnsafeCell::new(unsafe { raw.assume_init() }),
        })
    }

    #[inline]
    pub fn lock(&self) -> Result<()> {
        unsafe { EnterCriticalSection(self.raw.get()) };
        Ok(())
    }

    #[inline]
    pub fn try_lock(&self) -> bool {
        unsafe { TryEnterCriticalSection(self.raw.get()) != 0 }
    }

    #[inline]
    pub fn unlock(&self) -> Result<()> {
        unsafe { LeaveCriticalSection(self.raw.get()) };
        Ok(())
    }
}

impl Drop for Mutex {
    fn drop(&mut self) {
        unsafe { DeleteCriticalSection(self.raw.get()) };
    }
}
