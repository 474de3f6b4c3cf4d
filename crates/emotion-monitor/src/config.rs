//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `EMOTION_MONITOR__<SECTION>__<KEY>` environment variables.

use std::path::Path;

use emotion_stats::{EmotionClasses, StatsConfig};
use face_analysis::AnalysisConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Config file read when no path is given (optional)
pub const DEFAULT_CONFIG_PATH: &str = "config/emotion-monitor.toml";

const ENV_PREFIX: &str = "EMOTION_MONITOR";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Emotion labels emitted by the classifier, in class-index order
    pub classes: Vec<String>,

    /// Rolling statistics
    pub stats: StatsConfig,

    /// Face cropping and box filtering
    pub analysis: AnalysisConfig,

    /// Default log filter (overridden by RUST_LOG)
    pub log_level: String,

    /// Width of the text chart bars
    pub chart_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            stats: StatsConfig::default(),
            analysis: AnalysisConfig::default(),
            log_level: "info".to_string(),
            chart_width: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, a file, and the environment
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("classes")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        info!(
            "Loaded configuration: {} classes, window={} frames",
            config.classes.len(),
            config.stats.window_capacity
        );
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.window_capacity == 0 {
            return Err(ConfigError::Invalid(
                "stats.window_capacity must be at least 1".to_string(),
            ));
        }
        if self.chart_width == 0 {
            return Err(ConfigError::Invalid("chart_width must be at least 1".to_string()));
        }
        self.analysis
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.classes()?;
        Ok(())
    }

    /// Class set built from the configured labels
    pub fn classes(&self) -> Result<EmotionClasses, ConfigError> {
        EmotionClasses::new(self.classes.iter().cloned())
            .map_err(|e| ConfigError::Invalid(format!("classes: {}", e)))
    }
}
