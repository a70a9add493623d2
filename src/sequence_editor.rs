use crate::error::{Error, Result};
use crate::git::{GitCommand, build_sequence_editor_env};
use std::{
    fs::{File, read_to_string},
    io::Write,
    path::Path,
};

/// Entry point to rotate a rebase todo file in place.
///
/// # Arguments
///
/// * `todo_path` - Optional path to the todo file, as passed by git.
///
/// # Returns
///
/// * `Ok(())` on success.
/// * `Err` if the file path is missing or an I/O operation fails.
pub fn run(todo_path: Option<&Path>) -> Result<()> {
    match todo_path {
        Some(p) => rewrite(p),
        None => Err(Error::MissingArgument("todo file path")),
    }
}

/// Reads the todo file at `path`, moves its first instruction to the end of
/// the instruction block and writes the result back.
pub fn rewrite(path: &Path) -> Result<()> {
    let body = read_to_string(path)
        .map_err(|e| Error::todo(format!("read {} failed: {}", path.display(), e)))?;

    let rotated = rotate(&body);
    tracing::debug!(path = %path.display(), "rotated rebase todo");

    let mut file = File::create(path)
        .map_err(|e| Error::todo(format!("create {} failed: {}", path.display(), e)))?;
    file.write_all(rotated.as_bytes())
        .map_err(|e| Error::todo(format!("write {} failed: {}", path.display(), e)))
}

/// Moves the first line to just before the first blank line that follows it.
///
/// Lines between them keep their order and everything from the blank line on
/// passes through untouched. Without a blank separator the first line goes
/// to the end. Input with fewer than two lines is returned as-is.
///
/// Applying this twice does not restore the input.
pub fn rotate(body: &str) -> String {
    let mut lines: Vec<&str> = body.lines().collect();
    if lines.len() < 2 {
        return body.to_string();
    }

    let first = lines.remove(0);
    let separator = lines
        .iter()
        .position(|l| l.trim().is_empty())
        .unwrap_or(lines.len());
    lines.insert(separator, first);

    let mut out = lines.join("\n");
    if body.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Builds `git rebase -i <upstream>` with this program as the sequence
/// editor, so the todo list is rotated without opening an editor.
pub fn rebase_command(upstream: &str, exe_path: &str) -> GitCommand {
    GitCommand::new(["rebase", "-i", upstream])
        .env("GIT_SEQUENCE_EDITOR", build_sequence_editor_env(exe_path))
}
