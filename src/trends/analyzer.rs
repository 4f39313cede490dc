//! Trend analysis of tomorrow's forecast against recent history
//!
//! Compares the forecast with the history window to produce temperature and
//! precipitation trends, a comfort class and threshold warnings. The analyzer
//! holds only its immutable configuration, so one instance can serve any
//! number of concurrent callers.

use tracing::{debug, info, warn};

use super::types::{
    ComfortAnalysis, ComfortLevel, PrecipitationTrend, RainOutlook, TemperatureTrend,
    TrendAnalysis, TrendLabel, Volatility, WeatherWarning, round1,
};
use crate::advisory::{AdvisoryComposer, SuggestionSet};
use crate::config::AnalysisConfig;
use crate::models::{DailyConditions, ForecastRecord, History, WeatherCondition};
use crate::Result;

/// Above this maximum temperature humidity shifts the apparent temperature (°C)
const HUMIDITY_EFFECT_ONSET: f64 = 25.0;
const HUMIDITY_BASELINE: f64 = 50.0;
const HUMIDITY_FACTOR: f64 = 0.1;
/// Historical days above this precipitation probability count as rainy (%)
const RAINY_DAY_PROBABILITY: f64 = 50.0;
/// Tomorrow above this probability is a likely rain day and raises a warning (%)
const HIGH_RAIN_PROBABILITY: f64 = 70.0;
const POSSIBLE_RAIN_PROBABILITY: f64 = 40.0;

pub struct TrendAnalyzer {
    config: AnalysisConfig,
}

impl TrendAnalyzer {
    /// Create an analyzer, rejecting thresholds that fail validation
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Analyze tomorrow's forecast against the history window.
    ///
    /// Fails only when tomorrow's maximum or minimum temperature is absent.
    /// History entries lacking a temperature are left out of the temperature
    /// statistics; an empty history yields the reduced "no history" analysis.
    #[tracing::instrument(
        name = "analyze_trend",
        level = "debug",
        skip_all,
        fields(date = %tomorrow.date, history_days = history.len())
    )]
    pub fn analyze(&self, tomorrow: &ForecastRecord, history: &History) -> Result<TrendAnalysis> {
        let conditions = DailyConditions::from_record(tomorrow)?;

        let window = self.window(history);
        if window.is_empty() {
            info!("No historical data, producing a reduced analysis");
            return Ok(without_history(conditions));
        }

        let mut analysis = TrendAnalysis {
            temperature_trend: self.temperature_trend(&conditions, window),
            precipitation_trend: Some(precipitation_trend(&conditions, window)),
            comfort_analysis: Some(comfort_analysis(&conditions)),
            weather_warnings: self.warnings(&conditions, history.most_recent()),
            tomorrow: conditions,
            suggestions: SuggestionSet::default(),
        };
        analysis.suggestions = AdvisoryComposer::compose(&analysis);

        debug!(
            trend = ?analysis.trend_label(),
            warnings = analysis.weather_warnings.len(),
            "Trend analysis complete"
        );
        Ok(analysis)
    }

    /// The newest `analysis_days` records
    fn window<'a>(&self, history: &'a History) -> &'a [ForecastRecord] {
        let records = history.records();
        if records.len() > self.config.analysis_days {
            warn!(
                "Received {} historical days, only the newest {} are analyzed",
                records.len(),
                self.config.analysis_days
            );
            &records[..self.config.analysis_days]
        } else {
            records
        }
    }

    /// Temperature statistics over records carrying both temperatures.
    ///
    /// A record missing either value is skipped entirely, so a day with only a
    /// maximum does not feed the maximum mean or the standard deviation.
    fn temperature_trend(
        &self,
        tomorrow: &DailyConditions,
        window: &[ForecastRecord],
    ) -> Option<TemperatureTrend> {
        let (max_temps, min_temps): (Vec<f64>, Vec<f64>) = window
            .iter()
            .filter_map(|record| match (record.temp_max, record.temp_min) {
                (Some(max), Some(min)) if max.is_finite() && min.is_finite() => Some((max, min)),
                _ => {
                    debug!(date = %record.date, "Skipping historical record without temperatures");
                    None
                }
            })
            .unzip();

        if max_temps.is_empty() {
            warn!("No historical record carries both temperatures, temperature trend omitted");
            return None;
        }

        let avg_max_temp = mean(&max_temps);
        let avg_min_temp = mean(&min_temps);
        let max_temp_change = tomorrow.temp_max - avg_max_temp;
        let min_temp_change = tomorrow.temp_min - avg_min_temp;
        let temp_stddev = sample_stddev(&max_temps);

        let volatility = if temp_stddev > self.config.high_volatility_stddev {
            Volatility::High
        } else {
            Volatility::Normal
        };

        Some(TemperatureTrend {
            trend: classify_trend(
                max_temp_change,
                self.config.temp_change_threshold,
                self.config.temp_change_moderate_threshold,
            ),
            max_temp_change: round1(max_temp_change),
            min_temp_change: round1(min_temp_change),
            avg_max_temp: round1(avg_max_temp),
            avg_min_temp: round1(avg_min_temp),
            tomorrow_diurnal_range: round1(tomorrow.diurnal_range()),
            avg_historical_diurnal_range: round1(avg_max_temp - avg_min_temp),
            volatility,
            temp_stddev: round1(temp_stddev),
        })
    }

    /// Threshold warnings in fixed order: heat, cold, diurnal range, rain,
    /// day-over-day change against the most recent day.
    fn warnings(
        &self,
        tomorrow: &DailyConditions,
        most_recent: Option<&ForecastRecord>,
    ) -> Vec<WeatherWarning> {
        let mut warnings = Vec::new();

        if tomorrow.temp_max >= self.config.hot_warning_temp {
            warnings.push(WeatherWarning::Heat {
                temp_max: tomorrow.temp_max,
            });
        }

        if tomorrow.temp_min <= self.config.cold_warning_temp {
            warnings.push(WeatherWarning::Cold {
                temp_min: tomorrow.temp_min,
            });
        }

        let range = tomorrow.diurnal_range();
        if range > self.config.temp_diff_threshold {
            warnings.push(WeatherWarning::DiurnalRange {
                range: round1(range),
            });
        }

        if tomorrow.precipitation_probability > HIGH_RAIN_PROBABILITY {
            warnings.push(WeatherWarning::Rain {
                probability: tomorrow.precipitation_probability,
            });
        }

        if let Some(last_max) = most_recent.and_then(|record| record.temp_max) {
            let change = tomorrow.temp_max - last_max;
            if change.abs() > self.config.abrupt_change_threshold {
                warnings.push(WeatherWarning::AbruptChange {
                    change: round1(change),
                });
            }
        }

        warnings
    }
}

fn without_history(conditions: DailyConditions) -> TrendAnalysis {
    let mut analysis = TrendAnalysis {
        tomorrow: conditions,
        temperature_trend: Some(TemperatureTrend::no_history()),
        precipitation_trend: None,
        comfort_analysis: None,
        weather_warnings: Vec::new(),
        suggestions: SuggestionSet::default(),
    };
    analysis.suggestions = AdvisoryComposer::compose(&analysis);
    analysis
}

fn precipitation_trend(
    tomorrow: &DailyConditions,
    window: &[ForecastRecord],
) -> PrecipitationTrend {
    let recent_rainy_days = window
        .iter()
        .filter(|record| {
            WeatherCondition::classify(record.weather_text()) == WeatherCondition::Rain
                || record.precipitation_or_default() > RAINY_DAY_PROBABILITY
        })
        .count();

    PrecipitationTrend {
        probability: tomorrow.precipitation_probability,
        trend: classify_rain_outlook(tomorrow.precipitation_probability),
        recent_rainy_days,
        weather_description: tomorrow.weather.clone(),
    }
}

fn comfort_analysis(tomorrow: &DailyConditions) -> ComfortAnalysis {
    let apparent = apparent_temperature(tomorrow.temp_max, tomorrow.humidity);

    ComfortAnalysis {
        apparent_temperature: round1(apparent),
        comfort_level: classify_comfort(apparent),
        humidity: tomorrow.humidity,
        diurnal_range: round1(tomorrow.diurnal_range()),
    }
}

/// Simplified heat-adjusted temperature: humidity only counts on warm days.
/// Not a meteorological comfort index.
#[must_use]
pub fn apparent_temperature(temp_max: f64, humidity: f64) -> f64 {
    if temp_max > HUMIDITY_EFFECT_ONSET {
        temp_max + (humidity - HUMIDITY_BASELINE) * HUMIDITY_FACTOR
    } else {
        temp_max
    }
}

/// Classify the change of tomorrow's maximum against the historical mean
#[must_use]
pub fn classify_trend(delta: f64, significant: f64, moderate: f64) -> TrendLabel {
    let rising = delta > 0.0;
    match delta.abs() {
        d if d > significant && rising => TrendLabel::SignificantRise,
        d if d > significant => TrendLabel::SignificantFall,
        d if d > moderate && rising => TrendLabel::SlightRise,
        d if d > moderate => TrendLabel::SlightFall,
        _ => TrendLabel::Stable,
    }
}

/// Classify tomorrow's precipitation probability
#[must_use]
pub fn classify_rain_outlook(probability: f64) -> RainOutlook {
    match probability {
        p if p > HIGH_RAIN_PROBABILITY => RainOutlook::HighProbability,
        p if p > POSSIBLE_RAIN_PROBABILITY => RainOutlook::Possible,
        _ => RainOutlook::Low,
    }
}

/// Classify an apparent temperature; band edges belong to the listed band
#[must_use]
pub fn classify_comfort(apparent: f64) -> ComfortLevel {
    match apparent {
        t if (18.0..=26.0).contains(&t) => ComfortLevel::Comfortable,
        t if (15.0..18.0).contains(&t) || (t > 26.0 && t <= 30.0) => {
            ComfortLevel::FairlyComfortable
        }
        t if t < 15.0 => ComfortLevel::Cold,
        _ => ComfortLevel::Hot,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1); zero for fewer than two values
fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
