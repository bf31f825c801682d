//! Per-platform backends.
//!
//! Exactly one of these modules is compiled in; the public [`crate::mutex`],
//! [`crate::semaphore`] and [`crate::event`] modules re-export whichever one
//! matches the target so the rest of the workspace never needs a `cfg`.

#[cfg(unix)]
pub mod unix;
#[cfg(unix)]
pub use unix as platform;

#[cfg(windows)]
pub mod windows;
#[cfg(windows)]
pub use windows as platform;

#[cfg(not(any(unix, windows)))]
compile_error!("corewait-sys only supports POSIX-style (unix) and Windows-style (windows) threading platforms");
