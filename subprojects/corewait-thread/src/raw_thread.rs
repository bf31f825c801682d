//! Raw thread launch, join and yield.
//!
//! `thread` must be kept alive as long as it executes; once [`RawThread::join`]
//! returns its resources may be freed. Feeding an already-joined handle back
//! into `join` is a usage error, not a panic or a second successful join.

use std::ffi::c_void;

use crate::error::Result;
use crate::sys;

/// The user function to run on a newly launched thread.
pub type ThreadFunc = extern "C" fn(*mut c_void);

/// A live OS thread, opaque beyond launch/join.
///
/// Mental model: a thread is like a spaceship. After launch it needs to
/// explicitly land - skipping `join` leaks the native thread object and,
/// on some platforms, leaves the stack undefined for anything that comes
/// after.
pub struct RawThread {
    native: sys::platform::RawThread,
}

struct TrampolineArgs {
    func: ThreadFunc,
    context: *mut c_void,
}

impl RawThread {
    /// Calls the platform's thread creation function and launches the
    /// thread running `thread_func(thread_func_context)`.
    ///
    /// May call the allocator internally to create the platform's thread
    /// representation.
    pub fn launch(thread_func_context: *mut c_void, thread_func: ThreadFunc) -> Result<Self> {
        let args = Box::into_raw(Box::new(TrampolineArgs {
            func: thread_func,
            context: thread_func_context,
        }));

        #[cfg(unix)]
        let native = unsafe {
            sys::platform::RawThread::launch(args as *mut c_void, unix_trampoline)
        };
        #[cfg(windows)]
        let native = unsafe {
            sys::platform::RawThread::launch(args as *mut c_void, windows_trampoline)
        };

        match native {
            Ok(native) => Ok(Self { native }),
            Err(err) => {
                drop(unsafe { Box::from_raw(args) });
                Err(err)
            }
        }
    }

    /// Waits until the thread stops and frees its OS resources.
    ///
    /// If the thread hasn't been launched, behavior is undefined; this type
    /// cannot be constructed in that state, so the only misuse this rules
    /// out is calling it twice on handles obtained through the `ffi` module.
    pub fn join(self) -> Result<()> {
        self.native.join()
    }
}

#[cfg(unix)]
extern "C" fn unix_trampoline(args: *mut c_void) -> *mut c_void {
    run_trampoline(args);
    std::ptr::null_mut()
}

#[cfg(windows)]
extern "system" fn windows_trampoline(args: *mut c_void) -> u32 {
    run_trampoline(args);
    0
}

fn run_trampoline(args: *mut c_void) {
    let args = unsafe { Box::from_raw(args as *mut TrampolineArgs) };
    (args.func)(args.context);
}

/// Yields the calling thread's remaining time slice to another runnable
/// thread, if any.
pub fn yield_now() {
    sys::platform::yield_now();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    static RAN: AtomicBool = AtomicBool::new(false);

    extern "C" fn mark_ran(_context: *mut c_void) {
        RAN.store(true, Ordering::SeqCst);
    }

    #[test]
    fn launch_runs_the_function_and_join_waits() {
        RAN.store(false, Ordering::SeqCst);
        let thread = RawThread::launch(std::ptr::null_mut(), mark_ran).unwrap();
        thread.join().unwrap();
        assert!(RAN.load(Ordering::SeqCst));
    }

    #[test]
    fn yield_now_does_not_panic() {
        yield_now();
    }
}
