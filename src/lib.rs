//! Weather advisory engine
//!
//! Turns tomorrow's forecast and a short window of past daily observations
//! into trend statistics, comfort and warning classifications, practical
//! advice and a Markdown report ready for delivery.

pub mod advisory;
pub mod config;
pub mod error;
pub mod models;
pub mod trends;

// Re-export core types for public API
pub use advisory::{
    AdvisoryComposer, AdvisoryPipeline, AdvisoryReport, ReportRenderer, SuggestionSet,
    report_title,
};
pub use config::{AdvisoryConfig, AnalysisConfig, LoggingConfig, ReportConfig};
pub use error::AdvisoryError;
pub use models::{DailyConditions, ForecastRecord, HistoricalRecord, History, WeatherCondition};
pub use trends::{
    ComfortAnalysis, ComfortLevel, PrecipitationTrend, RainOutlook, TemperatureTrend,
    TrendAnalysis, TrendAnalyzer, TrendLabel, Volatility, WeatherWarning,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AdvisoryError>;
