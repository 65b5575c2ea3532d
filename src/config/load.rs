use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::suggest::MAX_SUGGESTIONS;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `MP3SHELF__`) override it, and falls back to struct
/// defaults for anything left unset.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MP3SHELF")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .library
            .extension
            .trim()
            .trim_start_matches('.')
            .is_empty()
        {
            return Err("library.extension must not be empty".to_string());
        }
        if self.art.cache_capacity == 0 {
            return Err("art.cache_capacity must be >= 1".to_string());
        }
        if !(1..=MAX_SUGGESTIONS).contains(&self.suggest.max_suggestions) {
            return Err(format!(
                "suggest.max_suggestions must be between 1 and {MAX_SUGGESTIONS}"
            ));
        }
        Ok(())
    }
}

/// Overrides the config file location when set.
pub const CONFIG_PATH_VAR: &str = "MP3SHELF_CONFIG_PATH";

const APP_DIR: &str = "mp3shelf";
const CONFIG_FILE: &str = "config.toml";

fn non_empty_var(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// The config file to read: `$MP3SHELF_CONFIG_PATH` if set, otherwise
/// [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    non_empty_var(CONFIG_PATH_VAR).or_else(default_config_path)
}

/// `mp3shelf/config.toml` under the XDG config home (`$XDG_CONFIG_HOME`, or
/// `$HOME/.config`). Empty variables count as unset.
pub fn default_config_path() -> Option<PathBuf> {
    non_empty_var("XDG_CONFIG_HOME")
        .or_else(|| non_empty_var("HOME").map(|home| home.join(".config")))
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
