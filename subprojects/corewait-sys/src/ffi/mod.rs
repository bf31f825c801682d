//! C ABI surface (opt-in via the `ffi` feature).
//!
//! Every primitive is exposed as an opaque, heap-allocated handle behind a
//! raw pointer: `*_init` allocates and returns the handle, `*_finalize`
//! consumes it. Every fallible operation returns a [`Status`] rather than a
//! `Result`, since the abstract contract only needs four outcomes and `enum`
//! values cross the C boundary more predictably than a `Result<T, E>` would.

mod event;
mod mutex;
mod semaphore;

pub use event::*;
pub use mutex::*;
pub use semaphore::*;

use crate::error::Error;

/// The four abstract outcomes a raw primitive operation can produce, as a
/// C-representable status code.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    NoMem = 1,
    ResourceUnavailable = 2,
    UsageError = 3,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::NoMem => Status::NoMem,
            Error::ResourceUnavailable => Status::ResourceUnavailable,
            Error::Usage(_) => Status::UsageError,
        }
    }
}

impl From<crate::error::Result<()>> for Status {
    fn from(result: crate::error::Result<()>) -> Self {
        match result {
            Ok(()) => Status::Ok,
            Err(err) => err.into(),
        }
    }
}
