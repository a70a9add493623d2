//! # git-shims
//!
//! Small command-line helpers around `git`.
//!
//! This crate provides:
//! - `git-rebase-rotate`: a `GIT_SEQUENCE_EDITOR` that moves the first
//!   rebase instruction to the end of the todo list
//! - `git-wip`: creates the next dated WIP branch (`wip/03-2024-05-01`)
//! - `git-fake-date`: commits with a faked author/committer date
//! - `git-latest-version`: prints the latest version tag
//! - `git-guard`: a wrapper aliased over `git` that confirms destructive
//!   commands and tells hooks when to stand down
//!
//! ## Usage
//!
//! ```bash
//! GIT_SEQUENCE_EDITOR=git-rebase-rotate git rebase -i HEAD~3
//! git-wip -v
//! git-fake-date "2 days ago" "Fix typo"
//! git-latest-version
//! alias git=git-guard
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Entry points for the binaries
//! - [`config`] - Optional TOML configuration
//! - [`error`] - Crate error type
//! - [`git`] - Git command runner
//! - [`prompt`] - User input abstractions
//! - [`sequence_editor`] - Rebase todo file rotation
//! - [`wip_branch`] - WIP branch naming
//! - [`fake_date`] - Date validation and backdated commits
//! - [`version_tag`] - Latest version tag resolution
//! - [`guard`] - Protective git wrapper

pub mod cli;
pub mod config;
pub mod error;
pub mod fake_date;
pub mod git;
pub mod guard;
pub mod prompt;
pub mod sequence_editor;
pub mod version_tag;
pub mod wip_branch;

pub use error::{Error, Result};
