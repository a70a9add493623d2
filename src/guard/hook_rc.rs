use crate::config::expand_home;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Finds the value assigned to `var` in a shell-style rc file.
///
/// Understands `VAR=value`, `export VAR=value` and single or double quoted
/// values. The last assignment wins. A leading `~` or `$HOME` is expanded.
pub fn sentinel_path(body: &str, var: &str) -> Option<PathBuf> {
    body.lines()
        .filter_map(|line| assignment(line, var))
        .last()
        .filter(|value| !value.is_empty())
        .map(|value| expand_home(&value))
}

fn assignment(line: &str, var: &str) -> Option<String> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);

    let (key, value) = line.split_once('=')?;
    if key != var {
        return None;
    }

    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    Some(unquoted.to_string())
}

/// Reads `rc` and returns the sentinel path it defines.
///
/// A missing rc file means hooks are not set up: `Ok(None)`.
pub fn read_sentinel_path(rc: &Path, var: &str) -> Result<Option<PathBuf>> {
    if !rc.exists() {
        return Ok(None);
    }
    let body = fs::read_to_string(rc)?;
    let path = sentinel_path(&body, var);
    if path.is_none() {
        tracing::warn!(rc = %rc.display(), var, "hook rc file does not define the sentinel path");
    }
    Ok(path)
}
