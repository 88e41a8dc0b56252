//! Test harness for running the launcher binary against a fake runtime.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use bubolo_launch_common::{ARCHIVE_NAME, RUNTIME_PATH};
use wait_timeout::ChildExt;

/// Upper bound for a single launcher run.
pub const RUN_TIMEOUT: Duration = Duration::from_secs(30);

// Scripts are written and then executed; running tests one at a time keeps a
// concurrent fork from holding a script open for writing (ETXTBSY).
static SERIAL: Mutex<()> = Mutex::new(());

pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// Path of the launcher binary under test.
pub fn get_launcher_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bubolo-launcher"))
}

/// Output of one launcher run.
#[derive(Debug)]
pub struct LaunchRun {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// A working directory laid out like a Bubolo install.
pub struct TestLayout {
    pub dir: PathBuf,
}

impl TestLayout {
    /// Create an empty directory for `test_name` under the target tmp dir.
    pub fn new(test_name: &str) -> Self {
        let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(format!("launcher-{}", test_name));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).expect("Failed to create test directory");

        Self { dir }
    }

    pub fn runtime_path(&self) -> PathBuf {
        self.dir.join(RUNTIME_PATH)
    }

    /// Install a shell script as the runtime, with the given mode.
    pub fn install_runtime_with_mode(&self, body: &str, mode: u32) {
        let runtime = self.runtime_path();
        fs::create_dir_all(runtime.parent().expect("runtime path has a parent"))
            .expect("Failed to create runtime directory");
        fs::write(&runtime, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write runtime");
        fs::set_permissions(&runtime, fs::Permissions::from_mode(mode))
            .expect("Failed to set runtime permissions");
    }

    /// Install an executable shell script as the runtime.
    pub fn install_runtime(&self, body: &str) {
        self.install_runtime_with_mode(body, 0o755);
    }

    /// Install an (empty) archive next to the runtime.
    pub fn install_archive(&self) {
        fs::write(self.dir.join(ARCHIVE_NAME), b"").expect("Failed to write archive");
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Run the launcher with this directory as its working directory.
    pub fn run_launcher(&self) -> LaunchRun {
        self.run_launcher_with(|_| {})
    }

    /// Like [`run_launcher`](Self::run_launcher), with extra setup of the
    /// launcher's command before it is spawned.
    pub fn run_launcher_with(&self, configure: impl FnOnce(&mut Command)) -> LaunchRun {
        let stdout_path = self.dir.join("launcher.stdout");
        let stderr_path = self.dir.join("launcher.stderr");
        let stdout = fs::File::create(&stdout_path).expect("Failed to create stdout file");
        let stderr = fs::File::create(&stderr_path).expect("Failed to create stderr file");

        let mut command = Command::new(get_launcher_path());
        command
            .current_dir(&self.dir)
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        configure(&mut command);

        let start = Instant::now();
        let mut child = command.spawn().expect("Failed to spawn launcher");

        let status = match child.wait_timeout(RUN_TIMEOUT).expect("Failed to wait for launcher") {
            Some(status) => status,
            None => {
                child.kill().ok();
                child.wait().ok();
                panic!("Launcher did not exit within {:?}", RUN_TIMEOUT);
            }
        };
        let elapsed = start.elapsed();

        LaunchRun {
            status,
            stdout: fs::read_to_string(&stdout_path).unwrap_or_default(),
            stderr: fs::read_to_string(&stderr_path).unwrap_or_default(),
            elapsed,
        }
    }

    pub fn cleanup(&self) {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).ok();
        }
    }
}

impl Drop for TestLayout {
    fn drop(&mut self) {
        // Keep the directory around when a test fails
        if !std::thread::panicking() {
            self.cleanup();
        } else {
            println!(
                "Test panicked, keeping test directory for debugging: {}",
                self.dir.display()
            );
        }
    }
}
