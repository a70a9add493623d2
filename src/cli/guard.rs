use crate::config::{self, Config};
use crate::error::Result;
use crate::git::Git;
use crate::guard::{self, GuardOutcome};
use crate::prompt::DialoguerLinePrompter;
use console::style;
use std::env;
use std::ffi::OsString;

/// Main entry point for `git-guard`.
///
/// Arguments are not parsed: everything after the program name is handed to
/// git as-is, so `alias git=git-guard` behaves like git.
///
/// # Exit Codes
///
/// * git's own exit code when git ran.
/// * `1` when the user declined a destructive command.
pub fn entry() -> Result<i32> {
    let args: Vec<OsString> = env::args_os().skip(1).collect();

    // A broken config must not take git down with it.
    let config = match config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", style(format!("git-guard: {}", e)).yellow());
            Config::default()
        }
    };

    let git = Git::from_config(&config.guard)?;
    let mut prompter = DialoguerLinePrompter;

    let outcome = guard::run(&git, &mut prompter, &config.guard, &args)?;
    if outcome == GuardOutcome::Declined {
        eprintln!(
            "{}",
            style("Canceled by user. git was not run.").yellow().bold()
        );
    }
    Ok(outcome.exit_code())
}
