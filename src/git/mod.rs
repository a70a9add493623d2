//! Thin wrappers around the external `git` binary.
//!
//! Every tool in this crate delegates real repository work to git. The
//! [`GitRunner`] trait is the seam: [`Git`] shells out, while tests use a
//! recording mock.

#[cfg(test)]
pub(crate) mod mock;

use crate::config::GuardConfig;
use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A single git invocation: its arguments plus environment variables that
/// apply to that child process only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitCommand {
    pub args: Vec<OsString>,
    pub envs: Vec<(String, String)>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        GitCommand {
            args: args.into_iter().map(|a| a.as_ref().to_os_string()).collect(),
            envs: Vec::new(),
        }
    }

    /// Adds an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Looks up an environment variable set on this invocation.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Arguments rendered for messages, e.g. `checkout -b wip/01-2024-01-01`.
    pub fn display(&self) -> String {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Abstraction over running git.
///
/// Implementors decide how the process is spawned; callers only see exit
/// codes and captured output.
pub trait GitRunner {
    /// Runs git with inherited stdio and returns its exit code unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GitSpawn`] if the process could not be started.
    fn status(&self, command: &GitCommand) -> Result<i32>;

    /// Runs git and returns its trimmed standard output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GitFailed`] with git's stderr when it exits non-zero,
    /// or [`Error::GitSpawn`] if the process could not be started.
    fn output(&self, command: &GitCommand) -> Result<String>;
}

/// The real git binary.
#[derive(Debug, Clone)]
pub struct Git {
    binary: PathBuf,
}

impl Git {
    /// Uses the binary at `binary` without any lookup.
    pub fn at(binary: impl Into<PathBuf>) -> Self {
        Git {
            binary: binary.into(),
        }
    }

    /// Finds git in `PATH`.
    ///
    /// Entries that resolve to the running executable are skipped, so a
    /// wrapper installed under the name `git` never ends up calling itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GitNotFound`] if no other `git` is on `PATH`.
    pub fn locate() -> Result<Self> {
        let me = std::env::current_exe()
            .ok()
            .and_then(|p| p.canonicalize().ok());

        let found = which::which_all("git")
            .map_err(|_| Error::GitNotFound)?
            .find(|candidate| !is_same_file(candidate, me.as_deref()));

        match found {
            Some(binary) => {
                tracing::debug!(git = %binary.display(), "located git");
                Ok(Git { binary })
            }
            None => Err(Error::GitNotFound),
        }
    }

    /// Honors an explicit `guard.git` setting, falling back to [`Git::locate`].
    pub fn from_config(config: &GuardConfig) -> Result<Self> {
        match config.git_binary() {
            Some(binary) => Ok(Git::at(binary)),
            None => Git::locate(),
        }
    }

    fn command(&self, command: &GitCommand) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&command.args);
        for (key, value) in &command.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

fn is_same_file(candidate: &Path, me: Option<&Path>) -> bool {
    match (candidate.canonicalize(), me) {
        (Ok(c), Some(me)) => c == me,
        _ => false,
    }
}

impl GitRunner for Git {
    fn status(&self, command: &GitCommand) -> Result<i32> {
        let mut cmd = self.command(command);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        tracing::debug!(args = %command.display(), "running git");
        let status = cmd.status().map_err(|source| Error::GitSpawn {
            command: command.display(),
            source,
        })?;

        // Killed by a signal: no code, report a plain failure.
        Ok(status.code().unwrap_or(1))
    }

    fn output(&self, command: &GitCommand) -> Result<String> {
        let mut cmd = self.command(command);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(args = %command.display(), "capturing git output");
        let out = cmd.output().map_err(|source| Error::GitSpawn {
            command: command.display(),
            source,
        })?;

        if out.status.success() {
            Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
        } else {
            Err(Error::GitFailed {
                command: command.display(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            })
        }
    }
}

/// Builds the value for the `GIT_SEQUENCE_EDITOR` environment variable.
///
/// Git runs the value through a shell, so `exe_path` is quoted when it
/// contains spaces.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     build_sequence_editor_env("/usr/local/bin/git-rebase-rotate"),
///     "/usr/local/bin/git-rebase-rotate"
/// );
/// assert_eq!(
///     build_sequence_editor_env("/opt/my tools/git-rebase-rotate"),
///     "\"/opt/my tools/git-rebase-rotate\""
/// );
/// ```
pub(crate) fn build_sequence_editor_env(exe_path: &str) -> String {
    if exe_path.contains(' ') {
        format!("\"{}\"", exe_path)
    } else {
        exe_path.to_string()
    }
}

/// Local branch names matching `pattern`, one per element.
///
/// Runs `git branch --list <pattern> --format=%(refname:short)`.
pub fn list_branches<G: GitRunner>(git: &G, pattern: &str) -> Result<Vec<String>> {
    let cmd = GitCommand::new([
        "branch",
        "--list",
        pattern,
        "--format=%(refname:short)",
    ]);
    Ok(split_lines(&git.output(&cmd)?))
}

/// Every tag in the repository, one per element.
pub fn list_tags<G: GitRunner>(git: &G) -> Result<Vec<String>> {
    let cmd = GitCommand::new(["tag", "--list"]);
    Ok(split_lines(&git.output(&cmd)?))
}

fn split_lines(out: &str) -> Vec<String> {
    out.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::mock::MockGit;
    use super::*;

    #[test]
    fn sequence_editor_quotes_when_needed() {
        let s = build_sequence_editor_env("/Users/me/My App/bin");
        assert_eq!(s, "\"/Users/me/My App/bin\"");
    }

    #[test]
    fn sequence_editor_no_quotes_when_no_space() {
        let s = build_sequence_editor_env("/usr/local/bin/myapp");
        assert_eq!(s, "/usr/local/bin/myapp");
    }

    #[test]
    fn env_value_returns_last_setting() {
        let cmd = GitCommand::new(["status"])
            .env("HUSKY_SKIP_HOOKS", "0")
            .env("HUSKY_SKIP_HOOKS", "1");
        assert_eq!(cmd.env_value("HUSKY_SKIP_HOOKS"), Some("1"));
        assert_eq!(cmd.env_value("GIT_AUTHOR_DATE"), None);
    }

    #[test]
    fn display_joins_arguments() {
        let cmd = GitCommand::new(["checkout", "-b", "wip/01-2024-01-01"]);
        assert_eq!(cmd.display(), "checkout -b wip/01-2024-01-01");
    }

    #[test]
    fn list_branches_splits_output() {
        let git = MockGit::new().with_output("branch", "wip/01-2024-01-01\n  wip/02-2024-01-02\n\n");
        let branches = list_branches(&git, "wip/*").unwrap();
        assert_eq!(branches, vec!["wip/01-2024-01-01", "wip/02-2024-01-02"]);

        let calls = git.calls();
        assert_eq!(
            calls[0].display(),
            "branch --list wip/* --format=%(refname:short)"
        );
    }

    #[test]
    fn list_tags_empty_repository() {
        let git = MockGit::new();
        assert!(list_tags(&git).unwrap().is_empty());
    }

    #[test]
    fn status_reports_spawn_failure() {
        let git = Git::at("/nonexistent/definitely/not/git");
        let err = git.status(&GitCommand::new(["status"])).unwrap_err();
        assert!(matches!(err, Error::GitSpawn { .. }));
    }
}
