//! Condition variable emulation for platforms whose native primitives
//! don't already provide one.
//!
//! [`Condvar`] is built entirely out of [`corewait_sys`] primitives - a
//! mutex, a counting semaphore and an auto-reset event - following the
//! Windows condition-variable emulation technique this crate generalizes
//! to any backend `corewait-sys` supports. See [`condvar`] for the
//! algorithm notes.

pub mod error;
mod condvar;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use condvar::Condvar;
pub use error::{Error, Result};
