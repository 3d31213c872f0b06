use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `CATALOGO__`), then an
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
            ::config::Environment::with_prefix("CATALOGO")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.catalog.extension.trim().trim_start_matches('.').is_empty() {
            return Err("catalog.extension must not be empty".to_string());
        }
        let name = self.export.file_name.trim();
        if name.is_empty() {
            return Err("export.file_name must not be empty".to_string());
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err("export.file_name must be a bare file name".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `CATALOGO_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CATALOGO_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Pick `$<xdg_var>` when set, otherwise `$HOME/<home_fallback>`.
fn xdg_dir(xdg_var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(xdg_var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}

/// Compute the default config path under `$XDG_CONFIG_HOME/catalogo/config.toml`
/// or `~/.config/catalogo/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("catalogo").join("config.toml"))
}

/// `$XDG_STATE_HOME/catalogo/catalogo.log` or `~/.local/state/catalogo/catalogo.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("catalogo").join("catalogo.log"))
}

/// `$XDG_DOWNLOAD_DIR` or `~/Downloads`.
pub fn default_download_dir() -> Option<PathBuf> {
    xdg_dir("XDG_DOWNLOAD_DIR", "Downloads")
}
