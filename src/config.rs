/// Global configuration management for Transformix
///
/// This module handles persistent configuration stored in the user's home directory.
/// Configuration is stored at: `$USER_HOME/.transformix/config.json`
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Card rendering theme, the one process-wide presentation flag.
pub const THEME_COLOR: &str = "color";
pub const THEME_PLAIN: &str = "plain";

/// Global configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base URL of the Transformix API server
    pub server_url: String,

    /// Card rendering theme: "color" or "plain"
    /// Persisted so the preference survives across sessions.
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    THEME_COLOR.to_string()
}

impl GlobalConfig {
    pub fn colored_output(&self) -> bool {
        self.theme != THEME_PLAIN
    }
}

/// Get the path to the global config file
///
/// Returns: `$USER_HOME/.transformix/config.json`
/// Respects `TRANSFORMIX_CONFIG_PATH` environment variable for testing.
fn get_config_path() -> Result<PathBuf, String> {
    if let Ok(test_path) = std::env::var("TRANSFORMIX_CONFIG_PATH") {
        return Ok(PathBuf::from(test_path));
    }

    let home_dir = dirs::home_dir().ok_or("Failed to get user home directory")?;
    let config_dir = home_dir.join(".transformix");
    let config_path = config_dir.join("config.json");
    Ok(config_path)
}

/// Load global configuration from disk
///
/// If the config file doesn't exist, creates a new one with default values.
pub fn load_config() -> Result<GlobalConfig, String> {
    let config_path = get_config_path()?;

    // If config file exists, read it
    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: GlobalConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        Ok(config)
    } else {
        // Create new config with default values
        let config = GlobalConfig::default();

        // Save to disk
        save_config(&config)?;

        Ok(config)
    }
}

/// Save global configuration to disk
///
/// Creates the `.transformix` directory if it doesn't exist.
pub fn save_config(config: &GlobalConfig) -> Result<(), String> {
    let config_path = get_config_path()?;

    // Ensure the parent directory exists
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    // Serialize config to JSON
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    // Write to file
    fs::write(&config_path, content).map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Persist a new theme preference and return the updated config.
pub fn set_theme(theme: &str) -> Result<GlobalConfig, String> {
    if theme != THEME_COLOR && theme != THEME_PLAIN {
        return Err(format!(
            "unknown theme '{}' (expected '{}' or '{}')",
            theme, THEME_COLOR, THEME_PLAIN
        ));
    }

    let mut config = load_config()?;
    config.theme = theme.to_string();
    save_config(&config)?;
    Ok(config)
}
