//! C ABI surface (opt-in via the `ffi` feature).
//!
//! This crate contributes no functions of its own: the typed `Mutex<T>`,
//! `Semaphore` and `ThreadLocal<T>` wrappers aren't expressible across a C
//! boundary, so the raw, opaque-handle operations from the backing crates
//! are what's actually exported. Enabling `corewait`'s `ffi` feature turns
//! on each backing crate's own `ffi` feature; the `__corewait_sys__*`,
//! `__corewait_thread__*`, `__corewait_tls__*` and `__corewait_condvar__*`
//! symbols they export are linked straight into the final artifact, so
//! embedders only need to depend on this crate to pull in all of them.
//! Each backing crate's `Status` enum is re-exported under its own
//! submodule here to keep the identically-named types from colliding.

pub mod condvar {
    pub use corewait_condvar::ffi::*;
}
pub mod sys {
    pub use corewait_sys::ffi::*;
}
pub mod thread {
    pub use corewait_thread::ffi::*;
}
pub mod tls {
    pub use corewait_tls::ffi::*;
}
