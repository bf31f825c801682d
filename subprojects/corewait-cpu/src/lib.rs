//! Logical CPU count inspection.
//!
//! Queries the host once per call and never caches: the count can change
//! at runtime on platforms with hot-pluggable or affinity-masked CPUs, and
//! the source this crate generalizes queries `sysctlbyname` fresh on every
//! call for the same reason.
//!
//! # References
//!
//! - <https://pubs.opengroup.org/onlinepubs/9699919799/functions/sysconf.html>
//! - <https://learn.microsoft.com/en-us/windows/win32/api/sysinfoapi/nf-sysinfoapi-getsysteminfo>

use std::num::NonZeroUsize;

/// Returns the number of logical CPUs available to this process.
///
/// Falls back to `1` if the platform reports `0` or a negative count,
/// since a process always has at least one thread of execution to run on.
pub fn logical_cpu_count() -> NonZeroUsize {
    let raw = platform_logical_cpu_count();
    NonZeroUsize::new(raw).unwrap_or_else(|| {
        tracing::warn!(
            raw,
            "platform reported zero logical CPUs, falling back to 1"
        );
        NonZeroUsize::new(1).expect("1 is non-zero")
    })
}

#[cfg(unix)]
fn platform_logical_cpu_count() -> usize {
    let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    if n < 1 {
        0
    } else {
        n as usize
    }
}

#[cfg(windows)]
fn platform_logical_cpu_count() -> usize {
    use std::mem::MaybeUninit;
    use windows_sys::Win32::System::SystemInformation::GetSystemInfo;

    let mut info = MaybeUninit::uninit();
    unsafe { GetSystemInfo(info.as_mut_ptr()) };
    let info = unsafe { info.assume_init() };
    info.dwNumberOfProcessors as usize
}

#[cfg(not(any(unix, windows)))]
compile_error!("corewait-cpu only supports POSIX-style (unix) and Windows-style (windows) platforms");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_at_least_one_cpu() {
        assert!(logical_cpu_count().get() >= 1);
    }
}
