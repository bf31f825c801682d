//! Ergonomic thread spawning over [`corewait_thread::RawThread`].
//!
//! Mental model carried over from the raw layer: a thread is like a
//! spaceship. After [`spawn`] launches it, [`JoinHandle::join`] is the only
//! way to land it and recover its result; dropping the handle without
//! joining leaks the OS thread object.

use std::cell::UnsafeCell;
use std::ffi::c_void;

use corewait_thread::RawThread;

use crate::result::Result;

/// An owned handle to a spawned thread, carrying back the value its
/// closure returned.
pub struct JoinHandle<T> {
    raw: RawThread,
    result: Box<UnsafeCell<Option<T>>>,
}

unsafe impl<T: Send> Send for JoinHandle<T> {}

struct ThreadData<F, T> {
    func: F,
    result: *mut Option<T>,
}

/// Spawns a new thread running `f` to completion, returning a handle that
/// yields its return value on [`JoinHandle::join`].
pub fn spawn<F, T>(f: F) -> Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let result = Box::new(UnsafeCell::new(None));
    let result_ptr = result.get();

    let data = Box::into_raw(Box::new(ThreadData { func: f, result: result_ptr }));

    let raw = match RawThread::launch(data as *mut c_void, trampoline::<F, T>) {
        Ok(raw) => raw,
        Err(err) => {
            drop(unsafe { Box::from_raw(data) });
            return Err(err.into());
        }
    };

    Ok(JoinHandle { raw, result })
}

extern "C" fn trampoline<F, T>(context: *mut c_void)
where
    F: FnOnce() -> T,
{
    let data = unsafe { Box::from_raw(context as *mut ThreadData<F, T>) };
    let value = (data.func)();
    unsafe { data.result.write(Some(value)) };
}

impl<T> JoinHandle<T> {
    /// Blocks until the thread finishes, then returns the value its
    /// closure produced.
    pub fn join(self) -> Result<T> {
        self.raw.join()?;
        let value = unsafe { (*self.result.get()).take() };
        Ok(value.expect("thread finished without writing its result"))
    }
}

/// Yields the calling thread's remaining time slice to another runnable
/// thread, if any.
pub fn yield_now() {
    corewait_thread::yield_now();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_returns_the_closures_value() {
        let handle = spawn(|| 2 + 2).unwrap();
        assert_eq!(handle.join().unwrap(), 4);
    }

    #[test]
    fn spawn_moves_captured_state() {
        let data = vec![1, 2, 3];
        let handle = spawn(move || data.iter().sum::<i32>()).unwrap();
        assert_eq!(handle.join().unwrap(), 6);
    }

    #[test]
    fn yield_now_does_not_panic() {
        yield_now();
    }
}
