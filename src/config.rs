//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::session::SessionConfig;
use crate::training::TrainingConfig as ScreenTrainingConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Local storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_session_key")]
    pub session_key: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("stationdesk").to_string_lossy().to_string())
        .unwrap_or_else(|| "./stationdesk_data".to_string())
}

fn default_session_key() -> String {
    crate::session::SESSION_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session_key: default_session_key(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

/// Simulated authentication latency
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_sign_in_latency")]
    pub sign_in_latency_ms: u64,

    #[serde(default = "default_sign_up_latency")]
    pub sign_up_latency_ms: u64,

    #[serde(default = "default_sign_out_latency")]
    pub sign_out_latency_ms: u64,
}

fn default_sign_in_latency() -> u64 {
    500
}

fn default_sign_up_latency() -> u64 {
    500
}

fn default_sign_out_latency() -> u64 {
    200
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            sign_in_latency_ms: default_sign_in_latency(),
            sign_up_latency_ms: default_sign_up_latency(),
            sign_out_latency_ms: default_sign_out_latency(),
        }
    }
}

/// Training screen animation settings
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_tick")]
    pub tick_ms: u64,

    #[serde(default = "default_max_increment")]
    pub max_increment: f64,
}

fn default_tick() -> u64 {
    500
}

fn default_max_increment() -> f64 {
    30.0
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick(),
            max_increment: default_max_increment(),
        }
    }
}

/// External backend endpoint. Read at startup, not used by any active path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

impl BackendConfig {
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().map(|u| !u.is_empty()).unwrap_or(false)
            && self.anon_key.as_deref().map(|k| !k.is_empty()).unwrap_or(false)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("stationdesk").join("config.toml")),
            Some(PathBuf::from("./stationdesk.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("STATIONDESK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Ok(url) = std::env::var("STATIONDESK_BACKEND_URL") {
            self.backend.url = Some(url);
        }
        if let Ok(key) = std::env::var("STATIONDESK_BACKEND_KEY") {
            self.backend.anon_key = Some(key);
        }

        if let Ok(level) = std::env::var("STATIONDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STATIONDESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Session store settings derived from `[storage]` and `[auth]`
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            storage_key: self.storage.session_key.clone(),
            sign_in_latency: Duration::from_millis(self.auth.sign_in_latency_ms),
            sign_up_latency: Duration::from_millis(self.auth.sign_up_latency_ms),
            sign_out_latency: Duration::from_millis(self.auth.sign_out_latency_ms),
        }
    }

    /// Training screen settings derived from `[training]`
    pub fn training_config(&self) -> ScreenTrainingConfig {
        ScreenTrainingConfig {
            tick: Duration::from_millis(self.training.tick_ms),
            max_increment: self.training.max_increment,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Station Desk Configuration
#
# Environment variables override these settings:
# - STATIONDESK_DATA_DIR
# - STATIONDESK_BACKEND_URL
# - STATIONDESK_BACKEND_KEY
# - STATIONDESK_LOG_LEVEL
# - STATIONDESK_LOG_FORMAT

[storage]
# Directory holding the local key-value store
data_dir = "~/.local/share/stationdesk"

# Key the signed-in session is stored under
session_key = "mock_user"

[auth]
# Simulated latency of the mock auth calls (ms)
sign_in_latency_ms = 500
sign_up_latency_ms = 500
sign_out_latency_ms = 200

[training]
# Interval between progress updates (ms)
tick_ms = 500

# Largest random progress step per update
max_increment = 30.0

[backend]
# Backend endpoint and access key (currently unused)
# url = "https://example.backend.local"
# anon_key = ""

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.session_key, "mock_user");
        assert_eq!(config.auth.sign_in_latency_ms, 500);
        assert_eq!(config.auth.sign_out_latency_ms, 200);
        assert_eq!(config.training.tick_ms, 500);
        assert!(!config.backend.is_configured());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_dir, "~/.local/share/stationdesk");
        assert_eq!(config.training.max_increment, 30.0);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.backend.url.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse(
            r#"
[auth]
sign_in_latency_ms = 0

[backend]
url = "https://backend.example"
anon_key = "public-key"
"#,
        )
        .unwrap();

        assert_eq!(config.auth.sign_in_latency_ms, 0);
        assert_eq!(config.auth.sign_up_latency_ms, 500);
        assert!(config.backend.is_configured());

        let session = config.session_config();
        assert_eq!(session.sign_in_latency, Duration::ZERO);
        assert_eq!(session.sign_up_latency, Duration::from_millis(500));
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth\n").unwrap();

        match Config::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_data_path_expands_home() {
        let storage = StorageConfig {
            data_dir: "./local".to_string(),
            ..Default::default()
        };
        assert_eq!(storage.data_path(), PathBuf::from("./local"));

        if let Some(home) = dirs::home_dir() {
            let storage = StorageConfig {
                data_dir: "~/.local/share/stationdesk".to_string(),
                ..Default::default()
            };
            assert_eq!(storage.data_path(), home.join(".local/share/stationdesk"));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tick_training_completes() {
        use crate::training::{TrainingScreen, TrainingState};

        let config = Config::parse("[training]\ntick_ms = 0").unwrap();
        let mut screen = TrainingScreen::new(config.training_config());
        screen.select_images().unwrap();
        screen.train().unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(screen.state(), TrainingState::Completed);
        assert!(!screen.is_running());
    }
}
