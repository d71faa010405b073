// Configuration management
use crate::error::{Result, SsoError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Actions the tool can take with a console sign-in URL.
pub const URL_ACTIONS: &[&str] = &["clip", "exec", "open", "print", "printurl"];

/// Subset of [`URL_ACTIONS`] usable when a URL is opened on behalf of an
/// `$AWS_PROFILE` integration, where printing would go nowhere visible.
pub const CONFIG_OPEN_OPTIONS: &[&str] = &["clip", "exec", "open"];

/// Log levels accepted by the `log_level` setting.
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Regions selectable as the default region for connecting to AWS.
pub const AVAILABLE_AWS_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "eu-south-1",
    "me-south-1",
    "sa-east-1",
    "us-gov-east-1",
    "us-gov-west-1",
];

/// Top-level settings written by the setup wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub default_sso: String,
    pub firefox_browser: String,
    pub url_action: String,
    pub url_exec_command: Vec<String>,
    pub browser: String,
    pub console_duration: i32,
    pub history_limit: i64,
    pub history_minutes: i64,
    pub log_level: String,
    pub auto_config_check: bool,
    pub cache_refresh: i64,
    pub config_profiles_url_action: String,
    // Tables go last so the serialized file keeps scalar settings on top
    pub sso: BTreeMap<String, SsoInstanceConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_sso: "Default".to_string(),
            sso: BTreeMap::new(),
            firefox_browser: String::new(),
            url_action: "open".to_string(),
            url_exec_command: Vec::new(),
            browser: String::new(),
            console_duration: 60,
            history_limit: 10,
            history_minutes: 1440,
            log_level: "warn".to_string(),
            auto_config_check: false,
            cache_refresh: 24,
            config_profiles_url_action: "open".to_string(),
        }
    }
}

/// Per-instance SSO connection details, keyed by instance name in
/// [`Settings::sso`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SsoInstanceConfig {
    pub start_url: String,
    pub sso_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,
}

impl Settings {
    /// Get the config directory path
    ///
    /// Priority:
    /// 1. XDG_CONFIG_HOME/ssokit (if env var is set)
    /// 2. ~/.config/ssokit (if ~/.config exists)
    /// 3. ~/.ssokit (fallback on Unix, doesn't create ~/.config)
    /// 4. Platform default on Windows
    pub fn config_dir() -> Result<PathBuf> {
        // First, check XDG_CONFIG_HOME environment variable (explicit opt-in)
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join("ssokit"));
        }

        // On Unix-like systems (Linux, macOS), detect existing structure
        #[cfg(unix)]
        {
            if let Some(home_dir) = dirs::home_dir() {
                let xdg_config = home_dir.join(".config");

                // If ~/.config exists, use it (user has adopted XDG)
                if xdg_config.exists() {
                    return Ok(xdg_config.join("ssokit"));
                }

                // Otherwise, use ~/.ssokit (don't create ~/.config for users)
                return Ok(home_dir.join(".ssokit"));
            }
        }

        // Fall back to platform-specific default for Windows
        #[cfg(not(unix))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                return Ok(config_dir.join("ssokit"));
            }
        }

        Err(SsoError::ConfigError(
            "Could not determine config directory".to_string(),
        ))
    }

    /// Get the config file path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load settings from the default config file, falling back to defaults
    /// when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!("Loading settings from: {}", path.display());
            let contents = fs::read_to_string(path)
                .map_err(|e| SsoError::ConfigError(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&contents)
                .map_err(|e| SsoError::ConfigError(format!("Failed to parse config file: {}", e)))
        } else {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            Ok(Settings::default())
        }
    }

    /// Save settings to the default config file, creating the config
    /// directory on first run.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| {
                SsoError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
            tracing::info!("Created config directory: {}", config_dir.display());
        }

        self.save_to(&Self::config_file_path()?)
    }

    /// Save settings to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| SsoError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| SsoError::ConfigError(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved settings to: {}", path.display());
        Ok(())
    }

    /// Connection details for a named instance, if configured.
    pub fn instance(&self, name: &str) -> Option<&SsoInstanceConfig> {
        self.sso.get(name)
    }

    /// Tracing level for the configured `log_level`; unrecognized names fall
    /// back to `warn`.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level.as_str() {
            "error" => tracing::Level::ERROR,
            "info" => tracing::Level::INFO,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_sso, "Default");
        assert_eq!(settings.url_action, "open");
        assert_eq!(settings.console_duration, 60);
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.history_minutes, 1440);
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.cache_refresh, 24);
        assert_eq!(settings.config_profiles_url_action, "open");
        assert!(!settings.auto_config_check);
        assert!(settings.sso.is_empty());
        assert!(settings.url_exec_command.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.default_sso = "Work".to_string();
        settings.url_action = "exec".to_string();
        settings.url_exec_command = vec!["/bin/open".to_string(), "-a".to_string()];
        settings.sso.insert(
            "Work".to_string(),
            SsoInstanceConfig {
                start_url: "https://work.awsapps.com/start".to_string(),
                sso_region: "eu-west-1".to_string(),
                default_region: Some("eu-central-1".to_string()),
            },
        );

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_sso = [broken").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SsoError::ConfigError(_)));
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_sso = \"Staging\"\nlog_level = \"debug\"\n").unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.default_sso, "Staging");
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.console_duration, 60);
        assert_eq!(loaded.cache_refresh, 24);
    }

    #[test]
    fn test_tracing_level_mapping() {
        let mut settings = Settings::default();
        assert_eq!(settings.tracing_level(), tracing::Level::WARN);

        settings.log_level = "error".to_string();
        assert_eq!(settings.tracing_level(), tracing::Level::ERROR);
        settings.log_level = "trace".to_string();
        assert_eq!(settings.tracing_level(), tracing::Level::TRACE);
        settings.log_level = "bogus".to_string();
        assert_eq!(settings.tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_config_open_options_are_a_subset_of_url_actions() {
        for option in CONFIG_OPEN_OPTIONS {
            assert!(
                URL_ACTIONS.contains(option),
                "{option} is not a recognized URL action"
            );
        }
    }
}
