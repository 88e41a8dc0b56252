//! Windows process creation.
//!
//! `CreateProcessW` with the runtime as application name, no security
//! attributes, handle inheritance off, no creation flags, the parent's
//! environment and the parent's current directory. The process and thread
//! handles from `PROCESS_INFORMATION` are owned by [`OsChild`] and closed when
//! it is dropped, process handle first.

use std::ffi::{OsStr, OsString};
use std::iter::once;
use std::mem;
use std::os::windows::ffi::OsStrExt;

use bubolo_launch_common::{ChildExit, LaunchError, LaunchResult, LaunchSpec};
use tracing::warn;
use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_FAILED};
use windows::Win32::System::Threading::{
    CreateProcessW, GetExitCodeProcess, WaitForSingleObject, INFINITE, PROCESS_CREATION_FLAGS,
    PROCESS_INFORMATION, STARTUPINFOW,
};

/// A handle closed on drop.
#[derive(Debug)]
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        unsafe {
            if let Err(e) = CloseHandle(self.0) {
                warn!("CloseHandle failed: {}", e);
            }
        }
    }
}

// Field order is drop order: process handle, then thread handle.
#[derive(Debug)]
pub(crate) struct OsChild {
    process: OwnedHandle,
    _thread: OwnedHandle,
    pid: u32,
}

fn to_wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(once(0)).collect()
}

/// Command line as the child sees it.
///
/// The runtime path goes first, quoted, so the child's C runtime takes it as
/// `argv[0]` and the launch arguments arrive intact from `argv[1]` on.
fn child_command_line(spec: &LaunchSpec) -> OsString {
    let mut command_line = OsString::from("\"");
    command_line.push(spec.program());
    command_line.push("\" ");
    command_line.push(spec.command_line());
    command_line
}

pub(crate) fn spawn(spec: &LaunchSpec) -> LaunchResult<OsChild> {
    let application = to_wide(spec.program().as_os_str());
    // CreateProcessW may write into the command line buffer.
    let mut command_line = to_wide(&child_command_line(spec));

    let startup_info = STARTUPINFOW {
        cb: mem::size_of::<STARTUPINFOW>() as u32,
        ..Default::default()
    };
    let mut process_info = PROCESS_INFORMATION::default();

    unsafe {
        CreateProcessW(
            PCWSTR(application.as_ptr()),
            PWSTR(command_line.as_mut_ptr()),
            None,
            None,
            false,
            PROCESS_CREATION_FLAGS(0),
            None,
            // Null: start in the launcher's own working directory.
            PCWSTR::null(),
            &startup_info,
            &mut process_info,
        )
    }
    .map_err(|e| LaunchError::from_win32(&e))?;

    Ok(OsChild {
        process: OwnedHandle(process_info.hProcess),
        _thread: OwnedHandle(process_info.hThread),
        pid: process_info.dwProcessId,
    })
}

impl OsChild {
    pub(crate) fn pid(&self) -> u32 {
        self.pid
    }

    pub(crate) fn wait_for_exit(&mut self) -> ChildExit {
        unsafe {
            if WaitForSingleObject(self.process.0, INFINITE) == WAIT_FAILED {
                warn!(
                    "WaitForSingleObject failed for child process {}: {}",
                    self.pid,
                    windows::core::Error::from_win32()
                );
                return ChildExit::Unknown;
            }

            let mut code = 0u32;
            match GetExitCodeProcess(self.process.0, &mut code) {
                Ok(()) => ChildExit::Exited(code as i32),
                Err(e) => {
                    warn!("GetExitCodeProcess failed for child process {}: {}", self.pid, e);
                    ChildExit::Unknown
                }
            }
        }
    }
}
