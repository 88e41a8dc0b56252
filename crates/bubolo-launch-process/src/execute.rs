//! Process creation and wait.
//!
//! A launch goes through three states:
//!
//! ```text
//! Launching --spawn ok--> WaitingForExit --wait--> Done
//!     |
//!     +--spawn err--> Failed
//! ```
//!
//! [`spawn`] is the first transition and hands out a [`ChildProcessHandle`].
//! [`ChildProcessHandle::wait`] consumes the handle, so the OS handles are
//! released exactly once and never before the child has terminated. The
//! failure path never holds a handle.

use bubolo_launch_common::{ChildExit, LaunchResult, LaunchSpec};
use tracing::{debug, error};

#[cfg(unix)]
use crate::execute_unix as imp;

#[cfg(windows)]
use crate::execute_windows as imp;

/// Creates the child, waits for it to terminate and releases its handles.
pub fn launch(spec: &LaunchSpec) -> LaunchResult<ChildExit> {
    let child = spawn(spec)?;
    Ok(child.wait())
}

/// Creates the child process described by `spec`.
///
/// The child inherits the environment and the working directory; no other
/// handles than the standard streams are passed down.
pub fn spawn(spec: &LaunchSpec) -> LaunchResult<ChildProcessHandle> {
    debug!(
        "Creating child process: {} {}",
        spec.program().display(),
        spec.command_line()
    );

    let inner = imp::spawn(spec).map_err(|e| {
        error!(
            "Failed to create child process {}: {}",
            spec.program().display(),
            e
        );
        e
    })?;

    debug!("Child process created (PID: {})", inner.pid());
    Ok(ChildProcessHandle { inner })
}

/// Owned handle to a running child.
///
/// Not `Clone`. Dropping it without calling [`wait`](Self::wait) still
/// releases the OS handles but leaves the child running.
#[derive(Debug)]
pub struct ChildProcessHandle {
    inner: imp::OsChild,
}

impl ChildProcessHandle {
    /// OS process id of the child.
    pub fn pid(&self) -> u32 {
        self.inner.pid()
    }

    /// Blocks until the child terminates, then releases the handles.
    ///
    /// There is no timeout and no way to cancel the wait.
    pub fn wait(mut self) -> ChildExit {
        let pid = self.pid();
        let exit = self.inner.wait_for_exit();
        debug!("Child process {} terminated: {}", pid, exit);

        drop(self);
        debug!("Handles for child process {} released", pid);

        exit
    }
}
