//! Process existence checking.
//!
//! Used to confirm that a launch leaves nothing behind once it returns.

/// Check if a process with the given PID exists.
///
/// Non-destructive. On Unix it uses `kill(pid, 0)`, which sends no signal; an
/// unreaped zombie still counts as existing. On Windows it tries `OpenProcess`.
///
/// ```rust,no_run
/// use bubolo_launch_process::process_exists;
///
/// if process_exists(1234) {
///     println!("Process 1234 is running");
/// }
/// ```
pub fn process_exists(pid: u32) -> bool {
    #[cfg(unix)]
    {
        process_exists_unix(pid)
    }

    #[cfg(windows)]
    {
        process_exists_windows(pid)
    }
}

#[cfg(unix)]
fn process_exists_unix(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        // Exists, but belongs to someone else.
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(windows)]
fn process_exists_windows(pid: u32) -> bool {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};

    unsafe {
        match OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) {
            Ok(handle) => {
                let _ = CloseHandle(handle);
                true
            }
            Err(_) => false,
        }
    }
}
