use crate::config::{self, Settings};

fn load_checked() -> Result<Settings, String> {
    let settings = Settings::load().map_err(|e| format!("cannot load config: {e}"))?;
    settings.validate()?;
    Ok(settings)
}

/// Settings for the binary. A missing, unreadable or invalid config file is
/// not fatal: it is logged and the built-in defaults are used.
pub fn load_settings() -> Settings {
    match load_checked() {
        Ok(settings) => {
            if let Some(path) = config::resolve_config_path().filter(|p| p.is_file()) {
                tracing::debug!(path = %path.display(), "loaded config");
            }
            settings
        }
        Err(reason) => {
            tracing::warn!(%reason, "falling back to default settings");
            Settings::default()
        }
    }
}
