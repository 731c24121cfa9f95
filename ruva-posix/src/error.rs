//! Error model for the module.
//!
//! Every fallible entry resolves into [`FsError`] before the boundary
//! conversion in [`crate::syscalls`] unpacks it into the VM's
//! multi-value convention (`nil`, message, code).

use std::ffi::CStr;
use std::io;
use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    /// A mode character outside `f`, `r`, `w`, `x`.
    #[error("invalid argument: mode character {0:?}")]
    InvalidMode(char),

    /// A path argument with an interior nul byte, rejected before
    /// reaching the host. Reported as EINVAL, the same way the host
    /// would refuse the path.
    #[error("{}", strerror(libc::EINVAL))]
    InvalidPath,

    /// Unknown user or group name. Every directory-backend failure is
    /// normalized to this one kind.
    #[error("{}", strerror(libc::ENOENT))]
    NoSuchEntry,

    /// A directory record whose id field does not parse as an integer.
    #[error(transparent)]
    BadId(#[from] ParseIntError),

    /// Failure reported by a host primitive, as the bare error number.
    #[error("{}", strerror(*.0))]
    Os(i32),
}

impl FsError {
    /// The OS error number, when this failure carries one.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            FsError::InvalidPath => Some(libc::EINVAL),
            FsError::NoSuchEntry => Some(libc::ENOENT),
            FsError::Os(code) => Some(*code),
            _ => None,
        }
    }

    /// Capture the calling thread's errno after a failed host call.
    pub(crate) fn last_os() -> Self {
        FsError::Os(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }
}

/// Message text for an OS error number, in the platform's wording.
///
/// Plain `strerror`: on glibc the `strerror_r` symbol is the GNU
/// `char*`-returning variant, so its return value cannot be checked the
/// XSI way. The calls here are serialized by the module's
/// request-response model.
pub fn strerror(code: i32) -> String {
    let ptr = unsafe { libc::strerror(code) };
    if ptr.is_null() {
        return format!("unknown error {code}");
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
