use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mp3shelf/config.toml` or `~/.config/mp3shelf/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MP3SHELF__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub art: ArtSettings,
    pub suggest: SuggestSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder the MP3s are taken from.
    pub folder: Option<PathBuf>,
    /// Whether to search the folder recursively.
    pub recursive: bool,
    /// File extension treated as audio (case-insensitive, without dot).
    pub extension: String,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Tag-reading worker threads. 0 = one per CPU.
    pub workers: usize,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            folder: None,
            recursive: false,
            extension: "mp3".to_string(),
            follow_links: true,
            include_hidden: true,
            workers: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtSettings {
    /// Address of the network interface album art is served on. Also used
    /// as the host part of generated art URLs.
    pub host: String,
    /// Listening port. 0 picks a free port.
    pub port: u16,
    /// Number of covers kept in memory.
    pub cache_capacity: usize,
    /// How long `close` waits for in-flight requests (milliseconds).
    pub shutdown_grace_ms: u64,
}

impl Default for ArtSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 64375,
            cache_capacity: crate::art::DEFAULT_CACHE_CAPACITY,
            shutdown_grace_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    /// Upper bound on the number of suggestions returned at once (1 to 20).
    pub max_suggestions: usize,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            max_suggestions: crate::suggest::MAX_SUGGESTIONS,
        }
    }
}
