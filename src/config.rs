//! Configuration management for the weather advisory engine
//!
//! Handles loading configuration from files and environment variables,
//! and validates the analysis thresholds before any analyzer is built.
//! Configuration is read once and is immutable afterwards.

use crate::AdvisoryError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Thresholds used by the trend analyzer
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Report presentation settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thresholds and window size for trend analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// |delta| above this is a significant rise/fall (°C)
    #[serde(default = "default_temp_change_threshold")]
    pub temp_change_threshold: f64,
    /// |delta| above this is a slight rise/fall (°C)
    #[serde(default = "default_temp_change_moderate_threshold")]
    pub temp_change_moderate_threshold: f64,
    /// Diurnal range above this raises a warning (°C)
    #[serde(default = "default_temp_diff_threshold")]
    pub temp_diff_threshold: f64,
    /// Maximum temperature at or above this raises a heat warning (°C)
    #[serde(default = "default_hot_warning_temp")]
    pub hot_warning_temp: f64,
    /// Minimum temperature at or below this raises a cold warning (°C)
    #[serde(default = "default_cold_warning_temp")]
    pub cold_warning_temp: f64,
    /// Day-over-day change of the maximum above this raises a warning (°C)
    #[serde(default = "default_abrupt_change_threshold")]
    pub abrupt_change_threshold: f64,
    /// Standard deviation of historical maxima above this is high volatility
    #[serde(default = "default_high_volatility_stddev")]
    pub high_volatility_stddev: f64,
    /// Number of most recent historical days considered
    #[serde(default = "default_analysis_days")]
    pub analysis_days: usize,
}

/// Report presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Location name shown in the report header and title
    #[serde(default = "default_location_name")]
    pub location_name: String,
    /// Attribution shown in the footer
    #[serde(default = "default_data_source")]
    pub data_source: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_temp_change_threshold() -> f64 {
    3.0
}

fn default_temp_change_moderate_threshold() -> f64 {
    1.5
}

fn default_temp_diff_threshold() -> f64 {
    10.0
}

fn default_hot_warning_temp() -> f64 {
    35.0
}

fn default_cold_warning_temp() -> f64 {
    5.0
}

fn default_abrupt_change_threshold() -> f64 {
    8.0
}

fn default_high_volatility_stddev() -> f64 {
    5.0
}

fn default_analysis_days() -> usize {
    7
}

fn default_location_name() -> String {
    "Nanjing".to_string()
}

fn default_data_source() -> String {
    "QWeather".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            temp_change_threshold: default_temp_change_threshold(),
            temp_change_moderate_threshold: default_temp_change_moderate_threshold(),
            temp_diff_threshold: default_temp_diff_threshold(),
            hot_warning_temp: default_hot_warning_temp(),
            cold_warning_temp: default_cold_warning_temp(),
            abrupt_change_threshold: default_abrupt_change_threshold(),
            high_volatility_stddev: default_high_volatility_stddev(),
            analysis_days: default_analysis_days(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            location_name: default_location_name(),
            data_source: default_data_source(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AnalysisConfig {
    /// Validate threshold ordering and ranges
    pub fn validate(&self) -> crate::Result<()> {
        let thresholds = [
            ("temp_change_threshold", self.temp_change_threshold),
            (
                "temp_change_moderate_threshold",
                self.temp_change_moderate_threshold,
            ),
            ("temp_diff_threshold", self.temp_diff_threshold),
            ("hot_warning_temp", self.hot_warning_temp),
            ("cold_warning_temp", self.cold_warning_temp),
            ("abrupt_change_threshold", self.abrupt_change_threshold),
            ("high_volatility_stddev", self.high_volatility_stddev),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() {
                return Err(AdvisoryError::config(format!(
                    "{name} must be a finite number"
                )));
            }
        }

        if self.temp_change_moderate_threshold < 0.0
            || self.temp_change_moderate_threshold >= self.temp_change_threshold
        {
            return Err(AdvisoryError::config(
                "temp_change_moderate_threshold must be non-negative and below temp_change_threshold",
            ));
        }

        if self.cold_warning_temp >= self.hot_warning_temp {
            return Err(AdvisoryError::config(
                "cold_warning_temp must be below hot_warning_temp",
            ));
        }

        if self.temp_diff_threshold <= 0.0 || self.abrupt_change_threshold <= 0.0 {
            return Err(AdvisoryError::config(
                "temp_diff_threshold and abrupt_change_threshold must be positive",
            ));
        }

        if self.analysis_days == 0 || self.analysis_days > 60 {
            return Err(AdvisoryError::config(
                "analysis_days must be between 1 and 60",
            ));
        }

        Ok(())
    }
}

impl AdvisoryConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. WEATHER_ADVISORY__ANALYSIS__HOT_WARNING_TEMP=36
        builder = builder.add_source(
            Environment::with_prefix("WEATHER_ADVISORY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AdvisoryConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-advisory").join("config.toml"))
    }

    /// Apply default values to empty string settings
    pub fn apply_defaults(&mut self) {
        if self.report.location_name.is_empty() {
            self.report.location_name = default_location_name();
        }
        if self.report.data_source.is_empty() {
            self.report.data_source = default_data_source();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AdvisoryError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AdvisoryError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AdvisoryConfig::default();
        assert_eq!(config.analysis.temp_change_threshold, 3.0);
        assert_eq!(config.analysis.temp_change_moderate_threshold, 1.5);
        assert_eq!(config.analysis.temp_diff_threshold, 10.0);
        assert_eq!(config.analysis.hot_warning_temp, 35.0);
        assert_eq!(config.analysis.cold_warning_temp, 5.0);
        assert_eq!(config.analysis.analysis_days, 7);
        assert_eq!(config.report.data_source, "QWeather");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AdvisoryConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_threshold_order() {
        let mut config = AdvisoryConfig::default();
        config.analysis.temp_change_moderate_threshold = 4.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("temp_change_moderate_threshold"));

        let mut config = AdvisoryConfig::default();
        config.analysis.cold_warning_temp = 40.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_window() {
        let mut analysis = AnalysisConfig::default();
        analysis.analysis_days = 0;
        assert!(matches!(
            analysis.validate(),
            Err(AdvisoryError::Config { .. })
        ));
    }

    #[test]
    fn test_config_validation_rejects_nan() {
        let mut analysis = AnalysisConfig::default();
        analysis.hot_warning_temp = f64::NAN;
        assert!(analysis.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "weather-advisory-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[analysis]\nhot_warning_temp = 37.5\nanalysis_days = 5\n\n[report]\nlocation_name = \"Hangzhou\""
        )
        .unwrap();

        let config = AdvisoryConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.analysis.hot_warning_temp, 37.5);
        assert_eq!(config.analysis.analysis_days, 5);
        assert_eq!(config.analysis.cold_warning_temp, 5.0);
        assert_eq!(config.report.location_name, "Hangzhou");
        assert_eq!(config.report.data_source, "QWeather");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AdvisoryConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weather-advisory"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
