use std::{env, path::PathBuf, str::FromStr};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `PLAYDECK__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYDECK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.controls.seek_step_percent) {
            return Err("controls.seek_step_percent must be between 1 and 100".to_string());
        }
        if self.audio.tick_ms < 10 {
            return Err("audio.tick_ms must be >= 10".to_string());
        }
        if tracing::Level::from_str(&self.logging.level).is_err() {
            return Err(format!("logging.level `{}` is not a log level", self.logging.level));
        }
        if self.storage.library_key.trim().is_empty() {
            return Err("storage.library_key must not be empty".to_string());
        }
        Ok(())
    }

    /// Directory used for persisted data and the default log file.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .data_dir
            .clone()
            .or_else(crate::storage::default_data_dir)
    }
}

/// Resolve the config path from `PLAYDECK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYDECK_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/playdeck/config.toml`
/// or `~/.config/playdeck/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("playdeck").join("config.toml"))
}
