//! Entry points for the git-shims binaries.
//!
//! Each submodule exposes an `entry()` returning the process exit code; the
//! binaries in `src/bin` only initialise logging and exit.

pub mod fake_date;
pub mod guard;
pub mod latest_version;
pub mod rebase_rotate;
pub mod wip;

use crate::error::Error;
use console::style;

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// Prints `err` to stderr in red.
pub fn report(err: &Error) {
    eprintln!("{}", style(format!("Error: {}", err)).red().bold());
}

/// Turns an entry result into an exit code, reporting any error.
pub fn exit_code(result: crate::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            1
        }
    }
}
