pub mod analyzer;
pub mod types;

pub use analyzer::TrendAnalyzer;
pub use types::{
    ComfortAnalysis, ComfortLevel, PrecipitationTrend, RainOutlook, TemperatureTrend,
    TrendAnalysis, TrendLabel, Volatility, WeatherWarning,
};
