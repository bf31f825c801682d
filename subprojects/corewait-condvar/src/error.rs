//! Error type for condition variable operations.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Allocation or kernel-object exhaustion while constructing the
    /// internal mutex, semaphore or event.
    #[error("insufficient memory or kernel objects")]
    NoMem,

    /// A transient condition prevented the operation; the caller may retry.
    #[error("resource temporarily unavailable")]
    ResourceUnavailable,

    /// A programming mistake (the guarded mutex was not locked by the
    /// caller before `wait`, the ceiling of the internal semaphore was
    /// exceeded because more threads were parked than anticipated). Behavior
    /// after this is returned is undefined by the contract.
    #[error("usage error: {0}")]
    Usage(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

impl From<corewait_sys::Error> for Error {
    fn from(err: corewait_sys::Error) -> Self {
        match err {
            corewait_sys::Error::NoMem => Error::NoMem,
            corewait_sys::Error::ResourceUnavailable => Error::ResourceUnavailable,
            corewait_sys::Error::Usage(ctx) => Error::Usage(ctx),
        }
    }
}

#[track_caller]
pub(crate) fn unexpected_os_error(context: &'static str) -> Error {
    tracing::error!(context, "unexpected OS primitive failure");
    debug_assert!(false, "unexpected OS error in {context}");
    Error::Usage(context)
}
