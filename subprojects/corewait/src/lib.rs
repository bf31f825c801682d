//! Ergonomic, portable threading primitives.
//!
//! `corewait` layers a `std`-shaped API over the raw building blocks in
//! [`corewait_sys`], [`corewait_thread`], [`corewait_tls`] and
//! [`corewait_condvar`]: a [`Mutex<T>`] that owns the data it protects, a
//! permit-based [`Semaphore`], a guard-based [`Condvar`], [`thread::spawn`]
//! returning a typed [`thread::JoinHandle`], and a lazily-initialized
//! [`thread_local::ThreadLocal<T>`]. Every type here is backed by exactly
//! one kernel object per instance; none of it allocates beyond what `std`
//! itself would for the equivalent API.
//!
//! The raw C-style surface this crate composes is available behind the
//! `ffi` feature in [`ffi`], for embedding in non-Rust callers.

pub mod condvar;
pub mod mutex;
pub mod result;
pub mod semaphore;
pub mod thread;
pub mod thread_local;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use condvar::Condvar;
pub use corewait_cpu::logical_cpu_count;
pub use mutex::{Mutex, MutexGuard};
pub use result::{Error, Result, TryLockError, TryLockResult};
pub use semaphore::{Semaphore, SemaphorePermit};
pub use thread::{spawn, yield_now, JoinHandle};
pub use thread_local::ThreadLocal;
