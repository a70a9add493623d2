//! Protective wrapper meant to be aliased over `git` in an interactive shell.
//!
//! - Destructive commands (`co --`, `co .`, `reset --hard`) ask first; a "no"
//!   means git is never run.
//! - `cherry-pick` runs with `HUSKY_SKIP_HOOKS=1`.
//! - Deleting a remote branch with `push` creates the sentinel file named in
//!   the user's hook rc file for the duration of the push.
//!
//! Everything else goes straight to the real git, exit code untouched.

pub mod hook_rc;
pub mod invocation;
pub mod sentinel;

pub use invocation::{Destructive, Invocation, PushShape};
pub use sentinel::SentinelFile;

use crate::config::GuardConfig;
use crate::error::Result;
use crate::git::{GitCommand, GitRunner};
use crate::prompt::{self, LinePrompter};
use std::ffi::OsString;

/// Hook-skip variable understood by husky.
pub const SKIP_HOOKS_ENV: &str = "HUSKY_SKIP_HOOKS";

/// Result of one wrapped invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The user declined; git was not run.
    Declined,
    /// Git ran and exited with this code.
    Delegated(i32),
}

impl GuardOutcome {
    /// Process exit code. A declined command counts as a failure.
    pub fn exit_code(self) -> i32 {
        match self {
            GuardOutcome::Declined => 1,
            GuardOutcome::Delegated(code) => code,
        }
    }
}

/// Runs one git invocation through the wrapper.
///
/// # Errors
///
/// Fails if the confirmation prompt cannot be read or git cannot be started.
/// Problems with the hook rc or sentinel file are logged and the push goes
/// ahead without it.
pub fn run<G: GitRunner, P: LinePrompter>(
    git: &G,
    prompter: &mut P,
    config: &GuardConfig,
    args: &[OsString],
) -> Result<GuardOutcome> {
    let invocation = Invocation::classify(args);
    tracing::debug!(?invocation, "classified git invocation");

    let mut cmd = GitCommand::new(args);
    let mut sentinel = None;

    match invocation {
        Invocation::Destructive(_) => {
            if config.confirm_destructive && !prompt::confirm_destructive(prompter, &cmd.display())? {
                return Ok(GuardOutcome::Declined);
            }
        }
        Invocation::CherryPick => {
            cmd = cmd.env(SKIP_HOOKS_ENV, "1");
        }
        Invocation::Push(PushShape::DeleteBranch) => {
            sentinel = skip_push_hooks(config);
        }
        Invocation::Push(PushShape::Help | PushShape::Update) | Invocation::Passthrough => {}
    }

    let code = git.status(&cmd)?;
    drop(sentinel);
    Ok(GuardOutcome::Delegated(code))
}

/// Creates the push sentinel if the user's hook rc file asks for one.
fn skip_push_hooks(config: &GuardConfig) -> Option<SentinelFile> {
    let rc = config.hook_rc_path();
    let path = match hook_rc::read_sentinel_path(&rc, &config.sentinel_var) {
        Ok(Some(path)) => path,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(rc = %rc.display(), error = %e, "could not read hook rc file");
            return None;
        }
    };

    match SentinelFile::create(&path) {
        Ok(sentinel) => Some(sentinel),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not create sentinel file");
            None
        }
    }
}
