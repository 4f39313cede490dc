use std::fmt;

use serde::{Deserialize, Serialize};

use crate::advisory::SuggestionSet;
use crate::models::DailyConditions;

/// Direction and magnitude of tomorrow's maximum against the recent mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    NoHistory,
    SignificantRise,
    SignificantFall,
    SlightRise,
    SlightFall,
    Stable,
}

impl TrendLabel {
    #[must_use]
    pub fn is_rising(self) -> bool {
        matches!(self, TrendLabel::SignificantRise | TrendLabel::SlightRise)
    }

    #[must_use]
    pub fn is_falling(self) -> bool {
        matches!(self, TrendLabel::SignificantFall | TrendLabel::SlightFall)
    }
}

/// Qualitative spread of recent daily maxima
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    High,
    Normal,
}

/// Rain outlook from tomorrow's precipitation probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainOutlook {
    /// Probability above 70%
    HighProbability,
    /// Probability above 40%
    Possible,
    Low,
}

/// Comfort class of the apparent temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComfortLevel {
    /// 18-26°C inclusive
    Comfortable,
    /// 15-18°C or above 26 up to 30°C
    FairlyComfortable,
    /// Below 15°C
    Cold,
    /// Above 30°C
    Hot,
}

/// Temperature statistics of tomorrow against the history window.
/// Numeric fields are rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureTrend {
    pub trend: TrendLabel,
    /// Tomorrow's maximum minus the mean historical maximum
    pub max_temp_change: f64,
    /// Tomorrow's minimum minus the mean historical minimum
    pub min_temp_change: f64,
    pub avg_max_temp: f64,
    pub avg_min_temp: f64,
    pub tomorrow_diurnal_range: f64,
    pub avg_historical_diurnal_range: f64,
    pub volatility: Volatility,
    /// Sample standard deviation of historical maxima
    pub temp_stddev: f64,
}

impl TemperatureTrend {
    /// Placeholder trend used when there is nothing to compare against
    #[must_use]
    pub fn no_history() -> Self {
        Self {
            trend: TrendLabel::NoHistory,
            max_temp_change: 0.0,
            min_temp_change: 0.0,
            avg_max_temp: 0.0,
            avg_min_temp: 0.0,
            tomorrow_diurnal_range: 0.0,
            avg_historical_diurnal_range: 0.0,
            volatility: Volatility::Normal,
            temp_stddev: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationTrend {
    /// Tomorrow's precipitation probability (%)
    pub probability: f64,
    pub trend: RainOutlook,
    /// Historical days with rain in the description or probability above 50%
    pub recent_rainy_days: usize,
    pub weather_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortAnalysis {
    /// Rounded to one decimal place
    pub apparent_temperature: f64,
    pub comfort_level: ComfortLevel,
    pub humidity: f64,
    /// Rounded to one decimal place
    pub diurnal_range: f64,
}

/// A single-line weather warning. Variants are listed in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeatherWarning {
    Heat { temp_max: f64 },
    Cold { temp_min: f64 },
    DiurnalRange { range: f64 },
    Rain { probability: f64 },
    /// Tomorrow's maximum minus the most recent day's maximum
    AbruptChange { change: f64 },
}

/// Complete analysis of tomorrow's weather against recent history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub tomorrow: DailyConditions,
    pub temperature_trend: Option<TemperatureTrend>,
    pub precipitation_trend: Option<PrecipitationTrend>,
    pub comfort_analysis: Option<ComfortAnalysis>,
    pub weather_warnings: Vec<WeatherWarning>,
    pub suggestions: SuggestionSet,
}

impl TrendAnalysis {
    /// True when the analysis was produced without any history
    #[must_use]
    pub fn is_without_history(&self) -> bool {
        self.temperature_trend
            .as_ref()
            .is_some_and(|t| t.trend == TrendLabel::NoHistory)
    }

    #[must_use]
    pub fn trend_label(&self) -> Option<TrendLabel> {
        self.temperature_trend.as_ref().map(|t| t.trend)
    }

    #[must_use]
    pub fn comfort_level(&self) -> Option<ComfortLevel> {
        self.comfort_analysis.as_ref().map(|c| c.comfort_level)
    }
}

/// Round to one decimal place for presentation
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// Display implementations
impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendLabel::NoHistory => write!(f, "no history"),
            TrendLabel::SignificantRise => write!(f, "significant rise"),
            TrendLabel::SignificantFall => write!(f, "significant fall"),
            TrendLabel::SlightRise => write!(f, "slight rise"),
            TrendLabel::SlightFall => write!(f, "slight fall"),
            TrendLabel::Stable => write!(f, "stable"),
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volatility::High => write!(f, "high"),
            Volatility::Normal => write!(f, "normal"),
        }
    }
}

impl fmt::Display for RainOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RainOutlook::HighProbability => write!(f, "high-probability rain"),
            RainOutlook::Possible => write!(f, "possible rain"),
            RainOutlook::Low => write!(f, "low rain"),
        }
    }
}

impl fmt::Display for ComfortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComfortLevel::Comfortable => write!(f, "comfortable"),
            ComfortLevel::FairlyComfortable => write!(f, "fairly comfortable"),
            ComfortLevel::Cold => write!(f, "cold"),
            ComfortLevel::Hot => write!(f, "hot"),
        }
    }
}

impl fmt::Display for WeatherWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherWarning::Heat { temp_max } => write!(
                f,
                "⚠️ Heat warning: tomorrow's high reaches {temp_max:.1}°C, stay cool and drink plenty of water"
            ),
            WeatherWarning::Cold { temp_min } => write!(
                f,
                "⚠️ Cold warning: tomorrow's low is {temp_min:.1}°C, dress warmly"
            ),
            WeatherWarning::DiurnalRange { range } => write!(
                f,
                "⚠️ Large temperature swing: {range:.1}°C between morning and afternoon, add or remove layers as needed"
            ),
            WeatherWarning::Rain { probability } => write!(
                f,
                "⚠️ Rain warning: {probability:.0}% chance of rain tomorrow, take an umbrella"
            ),
            WeatherWarning::AbruptChange { change } => {
                let direction = if *change > 0.0 { "higher" } else { "lower" };
                write!(
                    f,
                    "⚠️ Sharp temperature change: {:.1}°C {direction} than today, give your body time to adjust",
                    change.abs()
                )
            }
        }
    }
}
