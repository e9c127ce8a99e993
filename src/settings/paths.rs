//! Filesystem locations for configuration and logs.

use std::env;
use std::path::PathBuf;

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Config directory: "$XDG_CONFIG_HOME/viewpipe" or "$HOME/.config/viewpipe" (not created).
pub fn config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("viewpipe")
}

/// Default settings file inside [`config_dir`].
pub fn settings_path() -> PathBuf {
    config_dir().join("viewpipe.conf")
}

/// Logs directory under config: "<config>/logs" (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Paths hang off the XDG config home when it is set.
    ///
    /// - Input: Current environment
    /// - Output: Settings and logs live below the config dir with the expected names
    fn paths_nest_under_config_dir() {
        let config = config_dir();
        assert!(config.ends_with("viewpipe"));
        assert_eq!(settings_path(), config.join("viewpipe.conf"));
        assert_eq!(xdg_base_dir("VIEWPIPE_TEST_UNSET_VAR", &["a", "b"]).file_name(), Some(std::ffi::OsStr::new("b")));
    }
}
