//! Raw mutex, semaphore and auto-reset event primitives over the host's
//! native threading facilities.
//!
//! Each type here is a thin, opaque wrapper over a single OS object:
//! `pthread_mutex_t`/`CRITICAL_SECTION` for [`mutex::Mutex`], a hand-rolled
//! pthread-based counter or a native `HANDLE` for [`semaphore::Semaphore`],
//! and a pthread condvar-backed flag or a native auto-reset `HANDLE` for
//! [`event::Event`]. None of these types allocate beyond the single kernel
//! object created at construction, and none retry or recover from a usage
//! error: see [`error::Error`] for the contract.
//!
//! Higher-level composition (the condition-variable emulation, ergonomic
//! RAII guards) lives in sibling crates; this crate only exposes the raw
//! building blocks.
//!
//! # References
//!
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/pthread_mutex_lock.html>
//! - <https://learn.microsoft.com/en-us/windows/win32/sync/synchronization-objects>

mod sys;

pub mod error;
pub mod event;
pub mod mutex;
pub mod semaphore;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use error::{Error, Result};
pub use event::Event;
pub use mutex::Mutex;
pub use semaphore::Semaphore;
