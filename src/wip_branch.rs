//! Sequential, dated work-in-progress branches: `wip/01-2024-05-01`,
//! `wip/02-2024-05-03`, ...

use crate::config::WipConfig;
use crate::error::{Error, Result};
use crate::git::{self, GitCommand, GitRunner};
use chrono::NaiveDate;
use regex::Regex;

/// Knows how WIP branches are named for one prefix.
#[derive(Debug, Clone)]
pub struct WipNamer {
    prefix: String,
    width: usize,
    pattern: Regex,
}

impl WipNamer {
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `prefix` is empty.
    pub fn new(prefix: &str, width: usize) -> Result<Self> {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return Err(Error::config("wip prefix must not be empty"));
        }

        let pattern = Regex::new(&format!(
            r"^{}/(\d+)-\d{{4}}-\d{{2}}-\d{{2}}$",
            regex::escape(prefix)
        ))
        .map_err(|e| Error::config(format!("invalid wip prefix '{}': {}", prefix, e)))?;

        Ok(WipNamer {
            prefix: prefix.to_string(),
            width,
            pattern,
        })
    }

    pub fn from_config(config: &WipConfig) -> Result<Self> {
        WipNamer::new(&config.prefix, config.width)
    }

    /// Glob handed to `git branch --list`.
    pub fn list_pattern(&self) -> String {
        format!("{}/*", self.prefix)
    }

    /// The `NN` of a matching branch name, `None` for anything else.
    pub fn sequence_of(&self, name: &str) -> Option<u32> {
        self.pattern
            .captures(name.trim())
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    }

    /// Name of the branch that follows `existing`, dated `today`.
    pub fn next_name<S: AsRef<str>>(&self, existing: &[S], today: NaiveDate) -> String {
        let latest = existing
            .iter()
            .filter_map(|name| self.sequence_of(name.as_ref()))
            .max()
            .unwrap_or(0);

        format!(
            "{}/{:0width$}-{}",
            self.prefix,
            latest.saturating_add(1),
            today.format("%Y-%m-%d"),
            width = self.width
        )
    }
}

/// What `git-wip` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WipOutcome {
    /// Dry run: the command that would have been run.
    Preview(String),
    /// Branch creation was attempted; `exit_code` is git's.
    Created { name: String, exit_code: i32 },
}

/// `git checkout -b <name>`.
pub fn create_command(name: &str) -> GitCommand {
    GitCommand::new(["checkout", "-b", name])
}

/// Computes the next WIP branch and either creates it or, with `preview`,
/// reports the command instead.
pub fn run<G: GitRunner>(
    git: &G,
    namer: &WipNamer,
    today: NaiveDate,
    preview: bool,
) -> Result<WipOutcome> {
    let existing = git::list_branches(git, &namer.list_pattern())?;
    let name = namer.next_name(&existing, today);
    tracing::debug!(existing = existing.len(), %name, "computed wip branch");

    let cmd = create_command(&name);
    if preview {
        return Ok(WipOutcome::Preview(format!("git {}", cmd.display())));
    }

    let exit_code = git.status(&cmd)?;
    Ok(WipOutcome::Created { name, exit_code })
}
