//! Launch constants and the types describing a launch and its outcome.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::command_line::split_command_line;
use crate::errors::LaunchResult;

/// Runtime interpreter, relative to the launcher's working directory.
#[cfg(windows)]
pub const RUNTIME_PATH: &str = r"jdk-16.0.0.36-hotspot\bin\java.exe";

/// Runtime interpreter, relative to the launcher's working directory.
#[cfg(not(windows))]
pub const RUNTIME_PATH: &str = "jdk-16.0.0.36-hotspot/bin/java";

/// Archive holding the game, expected in the working directory.
pub const ARCHIVE_NAME: &str = "Bubolo.jar";

/// Class the runtime starts.
pub const ENTRY_POINT: &str = "bubolo.Main";

/// Arguments handed to the runtime: assertions on, archive on the classpath,
/// then the entry point.
pub const COMMAND_LINE: &str = r#"-ea -cp "Bubolo.jar" bubolo.Main"#;

/// What to start: an executable and the command line it receives.
///
/// The launcher binary only ever uses [`LaunchSpec::bubolo`]. Nothing is read
/// from the environment or from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    program: PathBuf,
    command_line: String,
}

impl LaunchSpec {
    pub fn new(program: impl Into<PathBuf>, command_line: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            command_line: command_line.into(),
        }
    }

    /// The bundled Java runtime running Bubolo.
    pub fn bubolo() -> Self {
        Self::new(RUNTIME_PATH, COMMAND_LINE)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// The command line split into the arguments the child will see.
    pub fn args(&self) -> Vec<String> {
        split_command_line(&self.command_line)
    }
}

/// How the child ended, as observed by the wait.
///
/// Only ever logged. The launcher's exit status does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// The child returned an exit code.
    Exited(i32),
    /// The child was terminated by a signal (Unix).
    Signaled(i32),
    /// The wait itself failed; the child's fate is not known.
    Unknown,
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exit code {}", code),
            Self::Signaled(signal) => write!(f, "signal {}", signal),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Terminal state of the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherExit {
    /// The child was created and has terminated.
    Completed,
    /// The child could not be created.
    Failed,
}

impl LauncherExit {
    /// Maps a launch outcome to the launcher's terminal state.
    ///
    /// Whatever the child returned is ignored: a created child always means
    /// [`LauncherExit::Completed`].
    pub fn from_outcome<T>(outcome: &LaunchResult<T>) -> Self {
        match outcome {
            Ok(_) => Self::Completed,
            Err(_) => Self::Failed,
        }
    }

    /// Process exit status for this state.
    pub fn code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::Failed => -1,
        }
    }
}
