use crate::config;
use crate::error::Result;
use crate::git::Git;
use crate::version_tag;
use clap::Parser;

/// Print the latest version tag of the current repository.
///
/// Prints nothing when no tag looks like a version.
#[derive(Debug, Parser)]
#[command(name = "git-latest-version", version)]
pub struct Args {}

pub fn entry() -> Result<i32> {
    Args::parse();
    let config = config::load()?;
    let git = Git::from_config(&config.guard)?;

    if let Some(tag) = version_tag::run(&git)? {
        println!("{}", tag);
    }
    Ok(0)
}
