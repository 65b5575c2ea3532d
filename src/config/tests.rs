use super::load::{CONFIG_PATH_VAR, default_config_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_env_var() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MP3SHELF_CONFIG_PATH", "/tmp/mp3shelf-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/mp3shelf-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("mp3shelf")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("mp3shelf")
            .join("config.toml")
    );
}

#[test]
fn empty_env_vars_count_as_unset() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set(CONFIG_PATH_VAR, "");
    let _g2 = EnvGuard::set("XDG_CONFIG_HOME", "");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.config/mp3shelf/config.toml")
    );
}

#[test]
fn defaults_match_reference_behavior() {
    let s = Settings::default();
    assert!(s.library.folder.is_none());
    assert!(!s.library.recursive);
    assert_eq!(s.library.extension, "mp3");
    assert_eq!(s.art.port, 64375);
    assert_eq!(s.art.cache_capacity, 256);
    assert_eq!(s.suggest.max_suggestions, 20);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
folder = "/srv/music"
recursive = true
extension = "MP3"
follow_links = false
include_hidden = false
workers = 3

[art]
host = "192.168.1.20"
port = 8080
cache_capacity = 16
shutdown_grace_ms = 100

[suggest]
max_suggestions = 5
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MP3SHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MP3SHELF__ART__PORT");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.folder, Some(PathBuf::from("/srv/music")));
    assert!(s.library.recursive);
    assert_eq!(s.library.extension, "MP3");
    assert!(!s.library.follow_links);
    assert!(!s.library.include_hidden);
    assert_eq!(s.library.workers, 3);
    assert_eq!(s.art.host, "192.168.1.20");
    assert_eq!(s.art.port, 8080);
    assert_eq!(s.art.cache_capacity, 16);
    assert_eq!(s.art.shutdown_grace_ms, 100);
    assert_eq!(s.suggest.max_suggestions, 5);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[art]
port = 8080
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MP3SHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MP3SHELF__ART__PORT", "9000");

    let s = Settings::load().unwrap();
    assert_eq!(s.art.port, 9000);
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut s = Settings::default();
    s.library.extension = ".".to_string();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.art.cache_capacity = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.suggest.max_suggestions = 0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_caps_max_suggestions_at_twenty() {
    let mut s = Settings::default();
    s.suggest.max_suggestions = 20;
    assert!(s.validate().is_ok());

    s.suggest.max_suggestions = 21;
    assert!(s.validate().is_err());

    s.suggest.max_suggestions = 50;
    assert!(s.validate().is_err());
}
