use crate::error::{Error, Result};
use crate::git::{GitCommand, GitRunner};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Recording stand-in for git used by unit tests.
pub(crate) struct MockGit {
    calls: RefCell<Vec<GitCommand>>,
    outputs: HashMap<String, Result<String>>,
    exit_code: i32,
    watched: Option<PathBuf>,
    seen: RefCell<Vec<bool>>,
}

impl MockGit {
    pub(crate) fn new() -> Self {
        MockGit {
            calls: RefCell::new(Vec::new()),
            outputs: HashMap::new(),
            exit_code: 0,
            watched: None,
            seen: RefCell::new(Vec::new()),
        }
    }

    /// Canned stdout for invocations whose first argument is `subcommand`.
    pub(crate) fn with_output(mut self, subcommand: &str, stdout: &str) -> Self {
        self.outputs
            .insert(subcommand.to_string(), Ok(stdout.to_string()));
        self
    }

    /// Makes invocations of `subcommand` fail with `stderr`.
    pub(crate) fn with_failure(mut self, subcommand: &str, stderr: &str) -> Self {
        self.outputs.insert(
            subcommand.to_string(),
            Err(Error::GitFailed {
                command: subcommand.to_string(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    pub(crate) fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Records whether `path` exists each time `status` is called.
    pub(crate) fn watching(mut self, path: PathBuf) -> Self {
        self.watched = Some(path);
        self
    }

    pub(crate) fn calls(&self) -> Vec<GitCommand> {
        self.calls.borrow().clone()
    }

    pub(crate) fn seen(&self) -> Vec<bool> {
        self.seen.borrow().clone()
    }
}

impl GitRunner for MockGit {
    fn status(&self, command: &GitCommand) -> Result<i32> {
        if let Some(path) = &self.watched {
            self.seen.borrow_mut().push(path.exists());
        }
        self.calls.borrow_mut().push(command.clone());
        Ok(self.exit_code)
    }

    fn output(&self, command: &GitCommand) -> Result<String> {
        self.calls.borrow_mut().push(command.clone());
        let key = command
            .args
            .first()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.outputs.get(&key) {
            Some(Ok(out)) => Ok(out.clone()),
            Some(Err(Error::GitFailed { command, stderr })) => Err(Error::GitFailed {
                command: command.clone(),
                stderr: stderr.clone(),
            }),
            Some(Err(_)) | None => Ok(String::new()),
        }
    }
}
