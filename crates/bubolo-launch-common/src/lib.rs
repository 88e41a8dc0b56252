//! # Bubolo Launch Common
//!
//! Types shared by the Bubolo launcher crates: the single launch error,
//! the fixed launch constants, and the exit-status types that turn a launch
//! outcome into the launcher's own process exit status.

pub mod command_line;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use command_line::split_command_line;
pub use errors::{LaunchError, LaunchResult};
pub use types::{
    ChildExit, LaunchSpec, LauncherExit, ARCHIVE_NAME, COMMAND_LINE, ENTRY_POINT, RUNTIME_PATH,
};
