//! Shared result/error types for the ergonomic surface.

use std::fmt;

/// An enumeration of possible errors associated with a [`crate::Mutex::try_lock`]
/// operation.
#[derive(Debug)]
pub enum TryLockError {
    /// The lock could not be acquired at this time because it is already
    /// held.
    WouldBlock,
}

impl fmt::Display for TryLockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("try_lock failed because the operation would block")
    }
}

impl std::error::Error for TryLockError {}

pub type TryLockResult<Guard> = core::result::Result<Guard, TryLockError>;

/// Construction and launch failures for the primitives in this crate.
///
/// Each variant wraps the error from whichever backing crate produced it.
/// All of them carry the same abstract contract underneath: insufficient
/// resources, or a usage error whose continued behavior is undefined.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sys(#[from] corewait_sys::Error),
    #[error(transparent)]
    Thread(#[from] corewait_thread::Error),
    #[error(transparent)]
    Tls(#[from] corewait_tls::Error),
    #[error(transparent)]
    Condvar(#[from] corewait_condvar::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
