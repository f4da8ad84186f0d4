// passgen platform paths
// Config and data directories for Linux, macOS and Windows.
//
// Uses `cfg(target_os)` to pick the right location at compile time.

use std::env;
use std::path::PathBuf;

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory for passgen.
///
/// - **Linux**: `$XDG_CONFIG_HOME/passgen` or `~/.config/passgen`
/// - **macOS**: `~/Library/Application Support/passgen`
/// - **Windows**: `%APPDATA%/passgen`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("passgen")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("passgen")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("passgen"),
            _ => home_dir().join(".config").join("passgen"),
        }
    }
}

/// Returns the platform-specific data directory, where credential stores live.
///
/// - **Linux**: `$XDG_DATA_HOME/passgen` or `~/.local/share/passgen`
/// - **macOS**: same as the config directory
/// - **Windows**: same as the config directory
pub fn get_data_dir() -> PathBuf {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("passgen"),
            _ => home_dir().join(".local").join("share").join("passgen"),
        }
    }
}
