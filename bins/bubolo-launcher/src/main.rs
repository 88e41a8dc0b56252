//! Bubolo launcher.
//!
//! Starts the bundled Java runtime on `Bubolo.jar`, waits for it to exit and
//! exits 0. If the runtime cannot be started, prints the OS error code and
//! exits -1. Takes no arguments and reads no configuration.

use std::process;

use bubolo_launch_common::{LaunchSpec, LauncherExit};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    initialize_logging();

    let spec = LaunchSpec::bubolo();
    info!("Launching {} {}", spec.program().display(), spec.command_line());

    let outcome = bubolo_launch_process::launch(&spec);
    match &outcome {
        Ok(exit) => debug!("Bubolo exited ({})", exit),
        Err(e) => println!("Unable to launch Bubolo: {}", e.code()),
    }

    process::exit(LauncherExit::from_outcome(&outcome).code());
}

/// Diagnostics go to stderr; stdout only ever carries the failure line.
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
