//! Per-platform backends; see [`crate::sys::unix`]/[`crate::sys::windows`].

#[cfg(unix)]
pub mod unix;
#[cfg(unix)]
pub use unix as platform;

#[cfg(windows)]
pub mod windows;
#[cfg(windows)]
pub use windows as platform;

#[cfg(not(any(unix, windows)))]
compile_error!("corewait-tls only supports POSIX-style (unix) and Windows-style (windows) threading platforms");
