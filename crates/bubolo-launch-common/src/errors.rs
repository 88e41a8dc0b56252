//! Error type for the Bubolo launcher.
//!
//! The launcher knows exactly one failure: the operating system refused to
//! create the child process. Whatever the cause (missing executable, denied
//! permission, bad format), the only thing carried forward is the raw OS
//! error number.
//!
//! ```rust
//! use bubolo_launch_common::{LaunchError, LaunchResult};
//!
//! fn create() -> LaunchResult<()> {
//!     Err(LaunchError::process_creation(2))
//! }
//!
//! let err = create().unwrap_err();
//! assert_eq!(err.code(), 2);
//! ```

use thiserror::Error;

/// Code reported when the OS gave no numeric error.
pub const UNKNOWN_OS_ERROR: i32 = -1;

/// Result type for launch operations.
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;

/// Launch error.
///
/// Deliberately a single variant: causes are not classified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LaunchError {
    /// The child process could not be created.
    #[error("Process creation failed: OS error {code}")]
    ProcessCreation { code: i32 },
}

impl LaunchError {
    /// Creates a process creation error from a raw OS error number.
    pub fn process_creation(code: i32) -> Self {
        Self::ProcessCreation { code }
    }

    /// Creates a process creation error from a failed spawn.
    ///
    /// Errors raised before reaching the OS (for example an argument holding
    /// a NUL byte) carry no OS number and map to [`UNKNOWN_OS_ERROR`].
    pub fn from_io(err: &std::io::Error) -> Self {
        Self::process_creation(err.raw_os_error().unwrap_or(UNKNOWN_OS_ERROR))
    }

    /// Creates a process creation error from a Win32 API failure.
    ///
    /// Win32 errors arrive wrapped in an HRESULT (`0x8007xxxx`); the wrapper
    /// is stripped so the code matches what `GetLastError` returned.
    #[cfg(windows)]
    pub fn from_win32(err: &windows::core::Error) -> Self {
        const FACILITY_WIN32_MASK: u32 = 0xFFFF_0000;
        const FACILITY_WIN32_PREFIX: u32 = 0x8007_0000;

        let hresult = err.code().0 as u32;
        let code = if hresult & FACILITY_WIN32_MASK == FACILITY_WIN32_PREFIX {
            (hresult & 0xFFFF) as i32
        } else {
            hresult as i32
        };
        Self::process_creation(code)
    }

    /// The OS error number.
    pub fn code(&self) -> i32 {
        match self {
            Self::ProcessCreation { code } => *code,
        }
    }
}
