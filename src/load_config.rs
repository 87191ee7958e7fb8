use crate::config::Settings;
use crate::error::{ClgError, Result};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Loads settings from an optional YAML file.
///
/// Without a path the built-in defaults are used. Missing keys in the file
/// fall back to the defaults as well.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path_ref) = path else {
        info!("No settings file given, using defaults");
        let settings = Settings::default();
        settings.trace_loaded();
        return Ok(settings);
    };

    info!(config_path = ?path_ref, "Loading settings from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read settings file");
            return Err(ClgError::Config(format!(
                "failed to read settings file {}: {e}",
                path_ref.display()
            )));
        }
    };

    let settings = parse_settings(&content)?;
    info!(config_path = ?path_ref, "Parsed settings YAML successfully");
    settings.trace_loaded();
    Ok(settings)
}

/// Parses and validates a YAML settings document.
pub fn parse_settings(content: &str) -> Result<Settings> {
    // An empty file deserializes to unit, not to a mapping.
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_yaml::from_str(content).map_err(|e| {
        error!(error = ?e, "Failed to parse settings YAML");
        ClgError::Config(format!("failed to parse settings YAML: {e}"))
    })?;

    if settings.extensions.is_empty() {
        return Err(ClgError::Config("extensions must not be empty".into()));
    }
    if let Some(bad) = settings.extensions.iter().find(|e| !e.starts_with('.')) {
        return Err(ClgError::Config(format!(
            "extension {bad:?} must start with a dot"
        )));
    }
    if settings.hosting.host.trim().is_empty() {
        return Err(ClgError::Config("hosting.host must not be empty".into()));
    }

    Ok(settings)
}
