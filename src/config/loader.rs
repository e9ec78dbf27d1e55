//! Configuration file loading.

use std::path::Path;

use jsonc_parser::ParseOptions;

use super::{
    ConfigError,
    Settings,
};

/// Name of the optional configuration file at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".ioblate.json";

/// Reads `.ioblate.json` from the workspace root.
///
/// Comments and trailing commas are accepted.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and was parsed
/// - `Ok(None)`: no configuration file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_workspace(workspace_root: &Path) -> Result<Option<Settings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| ConfigError::SyntaxError(e.to_string()))?
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
    let settings: Settings = serde_json::from_value(value)?;

    Ok(Some(settings))
}

/// Loads and validates the settings for a workspace, falling back to the
/// defaults when no configuration file exists.
pub fn load_settings(workspace_root: &Path) -> Result<Settings, ConfigError> {
    let settings = load_from_workspace(workspace_root)?.unwrap_or_default();

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}
