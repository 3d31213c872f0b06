use crate::config;

/// Load settings, falling back to the defaults when the config file cannot be
/// read or fails validation. The reason goes to stderr before the UI starts.
pub fn load_settings() -> config::Settings {
    let (settings, problem) = settings_or_defaults(config::Settings::load());
    if let Some(problem) = problem {
        eprintln!("catalogo: {problem}, using defaults");
    }
    settings
}

fn settings_or_defaults(
    loaded: Result<config::Settings, ::config::ConfigError>,
) -> (config::Settings, Option<String>) {
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config: {msg}")),
            ),
        },
        // A missing or unreadable config file is not fatal; the app starts with defaults.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config: {e}")),
        ),
    }
}
