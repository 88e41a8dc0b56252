//! Unix process creation.
//!
//! The command line is split into an argument vector and passed to the
//! runtime through `std::process::Command`. Before `exec`, every descriptor
//! above stderr is marked close-on-exec, including ones the launcher itself
//! inherited, so the runtime only receives stdin, stdout and stderr.

use std::fs;
use std::os::unix::io::RawFd;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Child, Command};

use bubolo_launch_common::{ChildExit, LaunchError, LaunchResult, LaunchSpec};
use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg, FdFlag};
use tracing::warn;

/// Lists the open descriptors of the current process.
const FD_DIR: &str = "/dev/fd";

/// Highest descriptor swept when `FD_DIR` cannot be read.
const FALLBACK_MAX_FD: RawFd = 4096;

const STDERR_FD: RawFd = 2;

#[derive(Debug)]
pub(crate) struct OsChild {
    child: Child,
}

/// Descriptors above stderr that may be open right now.
fn inherited_descriptors() -> Vec<RawFd> {
    match fs::read_dir(FD_DIR) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok()?.file_name().to_str()?.parse::<RawFd>().ok())
            .filter(|fd| *fd > STDERR_FD)
            .collect(),
        Err(e) => {
            warn!("Cannot list {}: {}; sweeping descriptors instead", FD_DIR, e);
            (STDERR_FD + 1..FALLBACK_MAX_FD).collect()
        }
    }
}

pub(crate) fn spawn(spec: &LaunchSpec) -> LaunchResult<OsChild> {
    let descriptors = inherited_descriptors();

    let mut command = Command::new(spec.program());
    command.args(spec.args());

    // SAFETY: the hook runs between fork and exec and only calls fcntl,
    // which is async-signal-safe. The descriptor list is built beforehand,
    // so nothing allocates in the child.
    unsafe {
        command.pre_exec(move || {
            for &fd in &descriptors {
                match fcntl(fd, FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC)) {
                    // Listed but already closed (e.g. the listing's own descriptor).
                    Ok(_) | Err(Errno::EBADF) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            Ok(())
        });
    }

    let child = command.spawn().map_err(|e| LaunchError::from_io(&e))?;

    Ok(OsChild { child })
}

impl OsChild {
    pub(crate) fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Waits and reaps the child. Once this returns no zombie entry is left.
    pub(crate) fn wait_for_exit(&mut self) -> ChildExit {
        match self.child.wait() {
            Ok(status) => match (status.code(), status.signal()) {
                (Some(code), _) => ChildExit::Exited(code),
                (None, Some(signal)) => ChildExit::Signaled(signal),
                (None, None) => ChildExit::Unknown,
            },
            Err(e) => {
                warn!("Failed to wait for child process {}: {}", self.pid(), e);
                ChildExit::Unknown
            }
        }
    }
}
