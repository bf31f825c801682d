//! Raw thread-local storage slot.
//!
//! A slot holds one untyped pointer per thread. No destructor runs when a
//! thread exits and leaves a non-null value behind: whatever is stored is
//! the caller's to reclaim, exactly as the pthreads backend this
//! generalizes behaves when created with a null destructor.

use std::ffi::c_void;
use std::marker::PhantomData;

use crate::error::Result;
use crate::sys;

/// A raw, per-thread storage slot for one untyped pointer.
pub struct Slot {
    inner: sys::platform::Key,
    // Slot is not `Sync` with respect to the pointer it stores, since the
    // stored value is only meaningful on the thread that set it; nothing
    // here prevents concurrent `set`/`get` of the key itself.
    _not_sync_for_value: PhantomData<*mut c_void>,
}

unsafe impl Send for Slot {}
unsafe impl Sync for Slot {}

impl Slot {
    /// Allocates a new slot, initially holding a null pointer on every
    /// thread.
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: sys::platform::Key::new()?,
            _not_sync_for_value: PhantomData,
        })
    }

    /// Sets the calling thread's value for this slot.
    pub fn set(&self, value: *mut c_void) -> Result<()> {
        self.inner.set(value)
    }

    /// Returns the calling thread's value for this slot, or null if unset.
    pub fn get(&self) -> *mut c_void {
        self.inner.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn unset_slot_reads_null() {
        let slot = Slot::new().unwrap();
        assert!(slot.get().is_null());
    }

    #[test]
    fn set_then_get_on_same_thread() {
        let slot = Slot::new().unwrap();
        let mut value = 42u32;
        slot.set(&mut value as *mut u32 as *mut c_void).unwrap();
        assert_eq!(slot.get() as *mut u32, &mut value as *mut u32);
    }

    #[test]
    fn each_thread_sees_its_own_value() {
        let slot = std::sync::Arc::new(Slot::new().unwrap());

        let a = std::sync::Arc::clone(&slot);
        let t1 = thread::spawn(move || {
            a.set(1 as *mut c_void).unwrap();
            a.get() as usize
        });
        let b = std::sync::Arc::clone(&slot);
        let t2 = thread::spawn(move || {
            b.set(2 as *mut c_void).unwrap();
            b.get() as usize
        });

        assert_eq!(t1.join().unwrap(), 1);
        assert_eq!(t2.join().unwrap(), 2);
    }
}
