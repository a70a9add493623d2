use crate::config;
use crate::error::Result;
use crate::fake_date::{self, NaturalDate, SystemDate};
use crate::git::Git;
use clap::Parser;

/// Commit with author and committer dates set to DATE.
///
/// DATE must be understood by both the system `date` command and the
/// built-in time parser, e.g. "2 days ago" or "2024-03-01 14:00".
#[derive(Debug, Parser)]
#[command(name = "git-fake-date", version)]
pub struct Args {
    /// Relative or absolute date expression.
    pub date: String,

    /// Commit message.
    pub message: String,

    /// Extra arguments for `git commit`, after `--`.
    #[arg(last = true)]
    pub extra: Vec<String>,
}

/// Main entry point for `git-fake-date`.
///
/// # Errors
///
/// Either date parser rejecting DATE is an error; nothing is committed.
pub fn entry() -> Result<i32> {
    let args = Args::parse();
    let config = config::load()?;
    let git = Git::from_config(&config.guard)?;

    fake_date::run(
        &git,
        &args.date,
        &args.message,
        &args.extra,
        &SystemDate,
        &NaturalDate::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn date_and_message() {
        let args = Args::try_parse_from(["git-fake-date", "2 days ago", "fix typo"]).unwrap();
        assert_eq!(args.date, "2 days ago");
        assert_eq!(args.message, "fix typo");
        assert!(args.extra.is_empty());
    }

    #[test]
    fn extra_commit_arguments() {
        let args =
            Args::try_parse_from(["git-fake-date", "yesterday", "wip", "--", "-a", "--no-verify"])
                .unwrap();
        assert_eq!(args.extra, vec!["-a", "--no-verify"]);
    }

    #[test]
    fn message_required() {
        assert!(Args::try_parse_from(["git-fake-date", "yesterday"]).is_err());
    }
}
