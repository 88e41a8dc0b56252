//! # Bubolo Launch Process
//!
//! OS process operations behind the Bubolo launcher:
//! - Creating the runtime child process
//! - Waiting for it without a timeout
//! - Releasing the process and thread handles afterwards
//! - Checking whether a process still exists

pub mod check;
pub mod execute;

#[cfg(unix)]
mod execute_unix;

#[cfg(windows)]
mod execute_windows;

// Re-export main types
pub use check::*;
pub use execute::*;
