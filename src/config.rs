use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an explicit configuration file.
pub const CONFIG_ENV: &str = "GIT_SHIMS_CONFIG";

/// Settings shared by the git-shims binaries.
///
/// Every field has a default so an absent or partial file is fine.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub wip: WipConfig,

    #[serde(default)]
    pub guard: GuardConfig,
}

/// Naming of work-in-progress branches.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WipConfig {
    #[serde(default = "default_wip_prefix")]
    pub prefix: String,

    #[serde(default = "default_wip_width")]
    pub width: usize,
}

fn default_wip_prefix() -> String {
    "wip".to_string()
}

fn default_wip_width() -> usize {
    2
}

impl Default for WipConfig {
    fn default() -> Self {
        WipConfig {
            prefix: default_wip_prefix(),
            width: default_wip_width(),
        }
    }
}

/// Behaviour of the protective wrapper.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GuardConfig {
    /// Explicit path to the real git binary. Empty means look it up in `PATH`.
    #[serde(default)]
    pub git: String,

    #[serde(default = "default_hook_rc")]
    pub hook_rc: String,

    #[serde(default = "default_sentinel_var")]
    pub sentinel_var: String,

    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

fn default_hook_rc() -> String {
    "~/.huskyrc".to_string()
}

fn default_sentinel_var() -> String {
    "HUSKY_SKIP_PUSH_FILE".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            git: String::new(),
            hook_rc: default_hook_rc(),
            sentinel_var: default_sentinel_var(),
            confirm_destructive: true,
        }
    }
}

impl GuardConfig {
    /// The hook rc path with a leading `~` expanded.
    pub fn hook_rc_path(&self) -> PathBuf {
        expand_home(&self.hook_rc)
    }

    /// The configured git binary, if one was set.
    pub fn git_binary(&self) -> Option<PathBuf> {
        if self.git.trim().is_empty() {
            None
        } else {
            Some(expand_home(self.git.trim()))
        }
    }
}

/// Expands a leading `~` or `$HOME` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = raw
        .strip_prefix("~")
        .or_else(|| raw.strip_prefix("$HOME"))
        .or_else(|| raw.strip_prefix("${HOME}"));

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. the file named by `GIT_SHIMS_CONFIG`
/// 2. `<config dir>/git-shims/config.toml`
/// 3. built-in defaults
///
/// # Errors
///
/// Returns [`Error::Config`] if a file is found but cannot be read or parsed.
pub fn load() -> Result<Config> {
    if let Some(explicit) = env::var_os(CONFIG_ENV) {
        return load_from(Path::new(&explicit));
    }

    match dirs::config_dir() {
        Some(dir) => {
            let path = dir.join("git-shims").join("config.toml");
            if path.exists() {
                load_from(&path)
            } else {
                Ok(Config::default())
            }
        }
        None => Ok(Config::default()),
    }
}

/// Parses the configuration file at `path`.
pub fn load_from(path: &Path) -> Result<Config> {
    let body = fs::read_to_string(path)
        .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: Config = toml::from_str(&body)
        .map_err(|e| Error::config(format!("cannot parse {}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
