//! Flag-file configuration.
//!
//! Defaults come from three layers, weakest first: the global config file,
//! a `.relayedrc` in the working directory, then the command line. Files
//! hold whitespace-separated CLI tokens, one or more per line, with `#`
//! comments.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from reading or writing flag files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write config {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove config {}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Flags that can come from a config file or the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_gutter: bool,
    pub fixed_height: bool,
    pub no_save_shortcut: bool,
    pub rows: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Booleans are or-ed; for valued options `other`
    /// wins when both are set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_gutter: self.no_gutter || other.no_gutter,
            fixed_height: self.fixed_height || other.fixed_height,
            no_save_shortcut: self.no_save_shortcut || other.no_save_shortcut,
            rows: other.rows.or(self.rows),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

/// Platform config file location, e.g. `~/.config/relayed/config` on
/// Linux. Falls back to `.relayedrc` in the working directory.
#[must_use]
pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("relayed").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("relayed")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("relayed").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("relayed")
                .join("config");
        }
    }

    PathBuf::from(".relayedrc")
}

/// Per-directory override, checked after the global file.
#[must_use]
pub fn local_override_path() -> PathBuf {
    PathBuf::from(".relayedrc")
}

/// Read a flag file. A missing file is an empty flag set, not an error.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] when the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` as a flag file, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Write`] when the directory or file cannot be
/// written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<(), ConfigError> {
    let mut lines = vec!["# relayed defaults (saved with --save)".to_string()];
    if flags.no_gutter {
        lines.push("--no-gutter".to_string());
    }
    if flags.fixed_height {
        lines.push("--fixed-height".to_string());
    }
    if flags.no_save_shortcut {
        lines.push("--no-save-shortcut".to_string());
    }
    if let Some(rows) = flags.rows {
        lines.push(format!("--rows {rows}"));
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, format!("{}\n", lines.join("\n"))).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Delete the flag file if it exists.
///
/// # Errors
///
/// Returns [`ConfigError::Remove`] when the file exists but cannot be
/// deleted.
pub fn clear_config_flags(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        fs::remove_file(path).map_err(|source| ConfigError::Remove {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Pick the flags this crate knows out of a token list, ignoring the rest
/// (clap validates the real command line). Both `--rows 8` and `--rows=8`
/// forms are accepted.
#[must_use]
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-gutter" {
            flags.no_gutter = true;
        } else if token == "--fixed-height" {
            flags.fixed_height = true;
        } else if token == "--no-save-shortcut" {
            flags.no_save_shortcut = true;
        } else if token == "--rows" {
            if let Some(next) = tokens.get(i + 1) {
                flags.rows = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--rows=") {
            flags.rows = value.parse().ok();
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}
