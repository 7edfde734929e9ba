//! Where zephyr keeps its files
//!
//! ```text
//! <config dir>/
//!   config.yaml            layout, bells, BRF scan window
//!   logs/zephyr.log.DATE   daily debug log
//! ```
//!
//! A non-empty `ZEPHYR_CONFIG_DIR` replaces the directory. Otherwise it is
//! `$XDG_CONFIG_HOME/braille-zephyr` or `~/.config/braille-zephyr`, and
//! `%APPDATA%\braille-zephyr` on Windows.

use std::{env, fs, path::PathBuf};

const APP_DIR: &str = "braille-zephyr";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_VAR: &str = "ZEPHYR_CONFIG_DIR";

/// Pick the config directory. An override wins; a blank value counts as
/// unset.
fn resolve_config_dir(
    override_dir: Option<PathBuf>,
    platform_base: Option<PathBuf>,
) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| platform_base.map(|base| base.join(APP_DIR)))
}

/// Per-user base directory that `braille-zephyr` lives under
fn platform_base() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    }
}

pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(env::var_os(CONFIG_DIR_VAR).map(PathBuf::from), platform_base())
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn create(dir: Option<PathBuf>) -> Result<PathBuf, String> {
    let dir =
        dir.ok_or_else(|| format!("No config directory available, set {}", CONFIG_DIR_VAR))?;
    fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    Ok(dir)
}

/// Create the config directory if needed, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    create(config_dir())
}

/// Create the logs directory if needed, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    create(logs_dir())
}
