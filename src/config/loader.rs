//! Environment overrides for settings

use std::path::PathBuf;

use super::types::Settings;

/// Apply environment variable overrides (MASTERMIND_* prefix)
pub fn with_env_overrides(settings: Settings) -> Settings {
    with_env_overrides_from(settings, |key| std::env::var(key).ok())
}

/// Same as [`with_env_overrides`] with an injectable variable lookup.
pub fn with_env_overrides_from(
    mut settings: Settings,
    get_env: impl Fn(&str) -> Option<String>,
) -> Settings {
    // MASTERMIND_CONFIG_FILE
    if let Some(file) = non_empty(get_env("MASTERMIND_CONFIG_FILE")) {
        settings.config_file = PathBuf::from(file);
    }

    // MASTERMIND_COMPOSE_FILE
    if let Some(file) = non_empty(get_env("MASTERMIND_COMPOSE_FILE")) {
        settings.compose_file = PathBuf::from(file);
    }

    // MASTERMIND_PROBE_PORTS
    if let Some(val) = get_env("MASTERMIND_PROBE_PORTS") {
        settings.probe_ports = val.to_lowercase() != "false" && val != "0";
    }

    // MASTERMIND_PACING_MS
    if let Some(val) = get_env("MASTERMIND_PACING_MS") {
        match val.trim().parse::<u64>() {
            Ok(ms) => settings.pacing_ms = ms,
            Err(_) => tracing::warn!(value = %val, "ignoring invalid MASTERMIND_PACING_MS"),
        }
    }

    settings
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
