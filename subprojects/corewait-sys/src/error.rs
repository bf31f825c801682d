//! Shared error type for the raw primitive layer.
//!
//! The abstract contract only distinguishes four outcomes: success, an
//! allocation/kernel-object exhaustion failure, a transient resource
//! shortage the caller may retry, and a usage error whose continued
//! behavior is undefined. Every crate in this workspace reuses this enum
//! rather than inventing finer distinctions that callers cannot act on.

/// The four abstract status codes a raw primitive operation can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Allocation failed, or the OS has exhausted some kernel-object table
    /// (e.g. `ENOMEM`, `ERROR_TOO_MANY_SEMAPHORES`).
    #[error("insufficient memory or kernel objects")]
    NoMem,

    /// A transient condition prevented the operation; the caller may retry.
    #[error("resource temporarily unavailable")]
    ResourceUnavailable,

    /// A programming mistake (unowned unlock, double-init, an OS call that
    /// should never fail failing anyway). Behavior after this is returned
    /// is undefined by the contract; it exists so release builds have
    /// something to return instead of aborting.
    #[error("usage error: {0}")]
    Usage(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Maps an unrecognized raw OS error code to [`Error::Usage`] and, in debug
/// builds, asserts so the real cause surfaces during development instead of
/// silently falling through to the generic code.
///
/// The source this crate generalizes maps unknown errors the same way:
/// a small error enum at the boundary, plus a debug-build assertion that
/// fires instead of inventing a distinction the caller cannot use.
#[track_caller]
pub(crate) fn unexpected_os_error(context: &'static str) -> Error {
    tracing::error!(context, "unexpected OS primitive failure");
    debug_assert!(false, "unexpected OS error in {context}");
    Error::Usage(context)
}
