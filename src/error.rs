use thiserror::Error;

/// Errors surfaced by the git-shims tools.
#[derive(Error, Debug)]
pub enum Error {
    #[error("`git` not found in PATH")]
    GitNotFound,

    #[error("failed to run `git {command}`: {source}")]
    GitSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`git {command}` failed: {stderr}")]
    GitFailed { command: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("`date` could not parse '{0}'")]
    SystemDateRejected(String),

    #[error("time parser could not parse '{0}'")]
    TimeParserRejected(String),

    #[error("rebase todo: {0}")]
    Todo(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn todo(msg: impl Into<String>) -> Self {
        Error::Todo(msg.into())
    }
}
