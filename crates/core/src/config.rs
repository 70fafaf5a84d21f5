use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable application settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// How long verdict feedback stays on screen, in milliseconds.
    pub feedback_delay_ms: u64,
    /// Probability that the next quiz question is a mixture question
    /// rather than a relation question.
    pub mix_question_bias: f64,
    /// Points awarded for a correct answer.
    pub points_per_correct: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            feedback_delay_ms: 1500,
            mix_question_bias: 0.6,
            points_per_correct: 10,
        }
    }
}

impl Settings {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}

/// Configuration manager for application settings
/// Settings are stored in config.json in the current working directory by
/// default, alongside a schema describing the valid range of each option
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

/// Available configuration options with validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub feedback_delay_ms: ConfigOption<u64>,
    pub mix_question_bias: ConfigOption<f64>,
    pub points_per_correct: ConfigOption<u32>,
}

/// Configuration option with its default and valid range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOption<T> {
    pub default: T,
    pub valid_range: Option<(T, T)>,
    pub description: String,
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub settings: Settings,
    pub created_at: String,
    pub modified_at: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    /// If no path is provided, defaults to 'config.json' in the current
    /// working directory
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from("config.json"));

        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    /// Load settings from the configuration file
    /// A missing file is created with defaults; out-of-range values fall
    /// back to defaults rather than failing the load
    pub fn load(&mut self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            self.save()?;
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "config file version {} doesn't match application version {}, using defaults for new settings",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        match Self::validate_settings(&config_file.settings) {
            Ok(()) => self.settings = config_file.settings,
            Err(errors) => {
                log::warn!(
                    "config file has invalid settings ({}), keeping defaults",
                    errors.join(", ")
                );
                self.settings = Settings::default();
            }
        }
        Ok(self.settings.clone())
    }

    /// Save current settings to the configuration file
    pub fn save(&self) -> Result<(), ConfigError> {
        // Ensure config directory exists (if config is in a subdirectory)
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
            }
        }

        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: self.settings.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            modified_at: chrono::Utc::now().to_rfc3339(),
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Validate and persist new settings
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        Self::validate_settings(&settings).map_err(ConfigError::ValidationError)?;
        self.settings = settings;
        self.save()
    }

    /// Get current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get configuration schema with available options
    pub fn schema() -> ConfigSchema {
        ConfigSchema {
            feedback_delay_ms: ConfigOption {
                default: 1500,
                valid_range: Some((0, 60_000)),
                description: "How long answer feedback stays visible, in milliseconds".to_string(),
            },
            mix_question_bias: ConfigOption {
                default: 0.6,
                valid_range: Some((0.0, 1.0)),
                description: "Probability of drawing a mixture question over a relation question"
                    .to_string(),
            },
            points_per_correct: ConfigOption {
                default: 10,
                valid_range: Some((1, 1000)),
                description: "Points awarded per correct answer".to_string(),
            },
        }
    }

    /// Validate settings against schema
    pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let schema = Self::schema();

        if let Some((min, max)) = schema.feedback_delay_ms.valid_range {
            if settings.feedback_delay_ms < min || settings.feedback_delay_ms > max {
                errors.push(format!(
                    "feedback_delay_ms must be between {} and {}",
                    min, max
                ));
            }
        }

        if let Some((min, max)) = schema.mix_question_bias.valid_range {
            if settings.mix_question_bias < min || settings.mix_question_bias > max {
                errors.push(format!(
                    "mix_question_bias must be between {} and {}",
                    min, max
                ));
            }
        }

        if let Some((min, max)) = schema.points_per_correct.valid_range {
            if settings.points_per_correct < min || settings.points_per_correct > max {
                errors.push(format!(
                    "points_per_correct must be between {} and {}",
                    min, max
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Reset settings to defaults
    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.settings = Settings::default();
        self.save()
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    ReadError(String),
    WriteError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(msg) => write!(f, "Failed to read config file: {}", msg),
            ConfigError::WriteError(msg) => write!(f, "Failed to write config file: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config file: {}", msg),
            ConfigError::SerializeError(msg) => write!(f, "Failed to serialize config: {}", msg),
            ConfigError::ValidationError(errors) => {
                write!(f, "Config validation errors: {}", errors.join(", "))
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_config_manager_new() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.json");

        let manager = ConfigManager::new(Some(config_path.clone()));
        assert_eq!(manager.config_path(), config_path);
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_load_creates_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let mut manager = ConfigManager::new(Some(config_path.clone()));
        let settings = manager.load().unwrap();

        assert_eq!(settings, Settings::default());
        assert!(config_path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.json");

        let mut manager = ConfigManager::new(Some(config_path.clone()));

        let settings = Settings {
            feedback_delay_ms: 800,
            points_per_correct: 25,
            ..Settings::default()
        };
        manager.update_settings(settings).unwrap();

        let mut manager2 = ConfigManager::new(Some(config_path));
        let loaded_settings = manager2.load().unwrap();

        assert_eq!(loaded_settings.feedback_delay_ms, 800);
        assert_eq!(loaded_settings.points_per_correct, 25);
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();

        assert!(ConfigManager::validate_settings(&settings).is_ok());

        settings.mix_question_bias = 1.5; // Outside valid range
        assert!(ConfigManager::validate_settings(&settings).is_err());

        settings.mix_question_bias = 0.6; // Back to valid
        settings.feedback_delay_ms = 120_000; // Outside valid range
        assert!(ConfigManager::validate_settings(&settings).is_err());

        settings.feedback_delay_ms = 1500;
        settings.points_per_correct = 0; // Below minimum
        assert!(ConfigManager::validate_settings(&settings).is_err());
    }

    #[test]
    fn test_update_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let mut manager = ConfigManager::new(Some(config_path.clone()));
        let settings = Settings {
            mix_question_bias: 2.0,
            ..Settings::default()
        };

        let result = manager.update_settings(settings);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        assert!(!config_path.exists());
    }

    #[test]
    fn test_load_falls_back_on_invalid_stored_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: Settings {
                feedback_delay_ms: 999_999,
                ..Settings::default()
            },
            created_at: chrono::Utc::now().to_rfc3339(),
            modified_at: chrono::Utc::now().to_rfc3339(),
        };
        std::fs::write(
            &config_path,
            serde_json::to_string_pretty(&config_file).unwrap(),
        )
        .unwrap();

        let mut manager = ConfigManager::new(Some(config_path));
        let settings = manager.load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_schema_completeness() {
        let schema = ConfigManager::schema();

        assert_eq!(schema.feedback_delay_ms.default, 1500);
        assert!(schema.mix_question_bias.valid_range.is_some());
        assert!(!schema.points_per_correct.description.is_empty());
    }
}
