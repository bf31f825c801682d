//! Error type for raw thread-local slot operations.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `PTHREAD_KEYS_MAX`/`TLS_MINIMUM_AVAILABLE` (or the platform
    /// equivalent) has been exhausted.
    #[error("insufficient memory or available slots to create a key")]
    NoMem,

    /// A transient condition prevented the operation; the caller may retry.
    #[error("resource temporarily unavailable")]
    ResourceUnavailable,

    /// A programming mistake: a destroyed or otherwise invalid key handed
    /// back in, or an OS call that should never fail failing anyway.
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
