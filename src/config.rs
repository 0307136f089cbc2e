use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{Result, SheetError};
use crate::input::{parse_key, KeyBinding};

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UIConfig,
    pub keys: KeysConfig,
    pub storage: StorageConfig,
}

/// UI-related configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    pub show_footer: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        UIConfig { show_footer: true }
    }
}

/// Key binding configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub focus_search: String,
    pub toggle_theme: String,
    pub quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            focus_search: "/".to_string(),
            toggle_theme: "t".to_string(),
            quit: "q".to_string(),
        }
    }
}

/// Resolved bindings for the configurable shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub focus_search: KeyBinding,
    pub toggle_theme: KeyBinding,
    pub quit: KeyBinding,
}

impl KeysConfig {
    pub fn bindings(&self) -> Result<Bindings> {
        Ok(Bindings {
            focus_search: parse_key(&self.focus_search)?,
            toggle_theme: parse_key(&self.toggle_theme)?,
            quit: parse_key(&self.quit)?,
        })
    }
}

/// Preference storage configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

/// `<config_dir>/gitsheet/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gitsheet").join("config.toml"))
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// use gitsheet::config::load_config;
/// let config = load_config("config.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.keys.bindings()?;
    Ok(config)
}

/// Loads the configuration for this run.
///
/// An explicit path must exist. The default location is optional: when the
/// file is missing the built-in defaults are used.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path)
            .map_err(|e| SheetError::Config(format!("{}: {}", path.display(), e)));
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Loading configuration from {:?}", path);
            load_config(&path)
        }
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_CONFIG: &str = r#"
[ui]
show_footer = false

[keys]
focus_search = "ctrl+f"
toggle_theme = "F2"
quit = "esc"

[storage]
path = "/tmp/gitsheet/prefs.db"
"#;

    #[test]
    fn test_load_config_from_str() {
        let config: Config = toml::from_str(SAMPLE_CONFIG).expect("Failed to parse sample config");
        assert!(!config.ui.show_footer);
        let bindings = config.keys.bindings().unwrap();
        assert_eq!(bindings.focus_search.code, KeyCode::Char('f'));
        assert_eq!(bindings.focus_search.modifiers, KeyModifiers::CONTROL);
        assert_eq!(bindings.toggle_theme.code, KeyCode::F(2));
        assert_eq!(bindings.quit.code, KeyCode::Esc);
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/gitsheet/prefs.db")));
    }

    #[test]
    fn test_defaults_for_missing_sections() {
        let config: Config = toml::from_str("[keys]\nquit = \"x\"\n").unwrap();
        assert!(config.ui.show_footer);
        assert_eq!(config.keys.focus_search, "/");
        assert_eq!(config.keys.quit, "x");
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();
        let config = load_config(file.path()).unwrap();
        assert!(!config.ui.show_footer);
    }

    #[test]
    fn test_invalid_binding_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[keys]\nquit = \"meta+banana\"\n").unwrap();
        assert!(matches!(load_config(file.path()), Err(SheetError::Key(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let result = resolve_config(Some(Path::new("/definitely/not/here.toml")));
        match result {
            Err(SheetError::Config(msg)) => assert!(msg.contains("/definitely/not/here.toml")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }
}
