use crate::config;
use crate::error::Result;
use crate::git::{Git, GitRunner};
use crate::sequence_editor;
use clap::Parser;
use console::style;
use std::path::PathBuf;

/// Move the first rebase instruction to the end of the todo list.
///
/// Used as `GIT_SEQUENCE_EDITOR`: git passes the todo file path.
#[derive(Debug, Parser)]
#[command(name = "git-rebase-rotate", version)]
pub struct Args {
    /// Rebase todo file to rewrite in place.
    #[arg(value_name = "TODO_FILE", required_unless_present = "rebase")]
    pub todo: Option<PathBuf>,

    /// Start `git rebase -i <UPSTREAM>` with this program as sequence editor.
    #[arg(long, value_name = "UPSTREAM", conflicts_with = "todo")]
    pub rebase: Option<String>,
}

/// Main entry point for `git-rebase-rotate`.
///
/// # Exit Codes
///
/// * `0` – todo file rewritten (or the launched rebase succeeded).
/// * Non-zero – rewrite failed, or git's exit code from the launched rebase.
pub fn entry() -> Result<i32> {
    let args = Args::parse();

    if let Some(upstream) = args.rebase {
        let config = config::load()?;
        let git = Git::from_config(&config.guard)?;
        let exe = std::env::current_exe()?;
        let cmd = sequence_editor::rebase_command(&upstream, &exe.to_string_lossy());
        return git.status(&cmd);
    }

    match sequence_editor::run(args.todo.as_deref()) {
        Ok(()) => Ok(0),
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Sequence editor error: {}", e)).red().bold()
            );
            Ok(1)
        }
    }
}
