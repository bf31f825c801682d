//! Error type for raw thread launch and join.

/// Failure modes of [`crate::RawThread::launch`] and
/// [`crate::RawThread::join`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The OS could not allocate the resources a new thread needs (a stack,
    /// a kernel thread object, or both).
    #[error("insufficient memory or kernel objects to launch a thread")]
    NoMem,

    /// A transient condition prevented the operation; the caller may retry.
    #[error("resource temporarily unavailable")]
    ResourceUnavailable,

    /// A programming mistake: joining an already-joined thread, or an OS
    /// call that should never fail failing anyway.
    #[error("usage error: {0}")]
    Usage(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

#[track_caller]
pub(crate) fn unexpected_os_error(context: &'static str) -> Error {
    tracing::error!(context, "unexpected OS primitive failure");
    debug_assert!(false, "unexpected OS error in {context}");
    Error::Usage(context)
}
