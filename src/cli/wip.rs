use crate::config;
use crate::error::Result;
use crate::git::Git;
use crate::wip_branch::{self, WipNamer, WipOutcome};
use chrono::Local;
use clap::Parser;

/// Create and check out the next dated work-in-progress branch.
#[derive(Debug, Parser)]
#[command(name = "git-wip", version)]
pub struct Args {
    /// Print the branch-creation command instead of running it.
    #[arg(short = 'v', long = "preview")]
    pub preview: bool,

    /// Branch prefix (defaults to the configured one, `wip`).
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Main entry point for `git-wip`. Returns git's exit code from
/// `git checkout -b`, or `0` in preview mode.
pub fn entry() -> Result<i32> {
    let args = Args::parse();
    let config = config::load()?;

    let prefix = args.prefix.as_deref().unwrap_or(&config.wip.prefix);
    let namer = WipNamer::new(prefix, config.wip.width)?;
    let git = Git::from_config(&config.guard)?;
    let today = Local::now().date_naive();

    match wip_branch::run(&git, &namer, today, args.preview)? {
        WipOutcome::Preview(command) => {
            println!("{}", command);
            Ok(0)
        }
        WipOutcome::Created { name, exit_code } => {
            tracing::info!(%name, exit_code, "wip branch requested");
            Ok(exit_code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn lowercase_v_is_preview() {
        let args = Args::try_parse_from(["git-wip", "-v"]).unwrap();
        assert!(args.preview);
        assert!(args.prefix.is_none());
    }

    #[test]
    fn defaults_create() {
        let args = Args::try_parse_from(["git-wip"]).unwrap();
        assert!(!args.preview);
    }

    #[test]
    fn prefix_override() {
        let args = Args::try_parse_from(["git-wip", "--prefix", "spike"]).unwrap();
        assert_eq!(args.prefix.as_deref(), Some("spike"));
    }
}
