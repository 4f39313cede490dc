//! Daily weather records as supplied by the forecast provider

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AdvisoryError, Result};

/// Humidity assumed when the provider omits it (%)
pub const DEFAULT_HUMIDITY: f64 = 50.0;
/// Precipitation probability assumed when the provider omits it (%)
pub const DEFAULT_PRECIPITATION_PROBABILITY: f64 = 0.0;
/// Description used when the provider omits it
pub const UNKNOWN_WEATHER: &str = "unknown";

/// One day of weather, either tomorrow's forecast or a past observation.
///
/// Every field except the date is optional at this boundary. Absent
/// temperatures are reported by [`DailyConditions::from_record`]; the other
/// fields fall back to documented defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastRecord {
    /// Calendar date the record describes
    pub date: NaiveDate,
    /// Daily maximum temperature in Celsius
    pub temp_max: Option<f64>,
    /// Daily minimum temperature in Celsius
    pub temp_min: Option<f64>,
    /// Human-readable description of weather conditions
    #[serde(alias = "weather_description")]
    pub weather: Option<String>,
    /// Relative humidity (0-100)
    pub humidity: Option<f64>,
    /// Probability of precipitation (0-100)
    pub precipitation_probability: Option<f64>,
    /// Wind force on the provider's scale, e.g. "3-4"
    pub wind_scale: Option<String>,
    /// Wind direction text, e.g. "NE"
    pub wind_dir: Option<String>,
}

/// Past days share the forecast shape.
pub type HistoricalRecord = ForecastRecord;

impl ForecastRecord {
    /// Create a record with both temperatures and no optional fields
    #[must_use]
    pub fn new(date: NaiveDate, temp_max: f64, temp_min: f64) -> Self {
        Self {
            date,
            temp_max: Some(temp_max),
            temp_min: Some(temp_min),
            weather: None,
            humidity: None,
            precipitation_probability: None,
            wind_scale: None,
            wind_dir: None,
        }
    }

    #[must_use]
    pub fn with_weather<S: Into<String>>(mut self, weather: S) -> Self {
        self.weather = Some(weather.into());
        self
    }

    #[must_use]
    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    #[must_use]
    pub fn with_precipitation_probability(mut self, probability: f64) -> Self {
        self.precipitation_probability = Some(probability);
        self
    }

    #[must_use]
    pub fn with_wind<S: Into<String>>(mut self, scale: S, direction: S) -> Self {
        self.wind_scale = Some(scale.into());
        self.wind_dir = Some(direction.into());
        self
    }

    /// Precipitation probability with the default applied
    #[must_use]
    pub fn precipitation_or_default(&self) -> f64 {
        self.precipitation_probability
            .unwrap_or(DEFAULT_PRECIPITATION_PROBABILITY)
    }

    /// Weather description, empty when absent
    #[must_use]
    pub fn weather_text(&self) -> &str {
        self.weather.as_deref().unwrap_or("")
    }
}

/// Coarse weather condition derived from the free-text description.
///
/// The provider only supplies text, so this is a keyword heuristic and
/// not a guaranteed classifier. Rain keywords win over snow keywords, so
/// sleet counts as rain. "Shower" and "thunder" only mean rain when no snow
/// keyword is present: "Light snow showers" is snow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Rain,
    Snow,
    Other,
}

const RAIN_KEYWORDS: &[&str] = &["rain", "drizzle", "sleet", "雨"];
const SNOW_KEYWORDS: &[&str] = &["snow", "flurr", "blizzard", "雪"];
/// Convective words that carry either rain or snow
const SHOWER_KEYWORDS: &[&str] = &["shower", "thunder"];
const CLEAR_KEYWORDS: &[&str] = &["sunny", "clear", "晴"];

impl WeatherCondition {
    /// Classify a description by keyword
    #[must_use]
    pub fn classify(description: &str) -> Self {
        let text = description.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

        if mentions(RAIN_KEYWORDS) {
            WeatherCondition::Rain
        } else if mentions(SNOW_KEYWORDS) {
            WeatherCondition::Snow
        } else if mentions(SHOWER_KEYWORDS) {
            WeatherCondition::Rain
        } else if mentions(CLEAR_KEYWORDS) {
            WeatherCondition::Clear
        } else {
            WeatherCondition::Other
        }
    }

    /// Rain or snow, either of which limits outdoor plans
    #[must_use]
    pub fn is_precipitating(self) -> bool {
        matches!(self, WeatherCondition::Rain | WeatherCondition::Snow)
    }
}

/// A forecast record with required fields checked and defaults applied
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyConditions {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub weather: String,
    pub condition: WeatherCondition,
    pub humidity: f64,
    pub precipitation_probability: f64,
    pub wind_scale: String,
    pub wind_dir: String,
}

impl DailyConditions {
    /// Validate a record, failing when either temperature is absent
    pub fn from_record(record: &ForecastRecord) -> Result<Self> {
        let temp_max = record
            .temp_max
            .ok_or_else(|| AdvisoryError::missing_field("temp_max"))?;
        let temp_min = record
            .temp_min
            .ok_or_else(|| AdvisoryError::missing_field("temp_min"))?;
        let weather = record
            .weather
            .clone()
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_WEATHER.to_string());

        Ok(Self {
            date: record.date,
            temp_max,
            temp_min,
            condition: WeatherCondition::classify(&weather),
            weather,
            humidity: record.humidity.unwrap_or(DEFAULT_HUMIDITY),
            precipitation_probability: record.precipitation_or_default(),
            wind_scale: record.wind_scale.clone().unwrap_or_else(|| "-".to_string()),
            wind_dir: record.wind_dir.clone().unwrap_or_else(|| "-".to_string()),
        })
    }

    /// Difference between the day's maximum and minimum.
    /// Negative when the provider swapped the two; callers tolerate that.
    #[must_use]
    pub fn diurnal_range(&self) -> f64 {
        self.temp_max - self.temp_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let record = ForecastRecord::new(date(), 20.0, 10.0);
        let conditions = DailyConditions::from_record(&record).unwrap();

        assert_eq!(conditions.humidity, 50.0);
        assert_eq!(conditions.precipitation_probability, 0.0);
        assert_eq!(conditions.weather, "unknown");
        assert_eq!(conditions.condition, WeatherCondition::Other);
        assert_eq!(conditions.diurnal_range(), 10.0);
    }

    #[test]
    fn test_missing_temperature_is_fatal() {
        let mut record = ForecastRecord::new(date(), 20.0, 10.0);
        record.temp_max = None;
        let err = DailyConditions::from_record(&record).unwrap_err();
        assert!(matches!(err, AdvisoryError::MissingField { ref field } if field == "temp_max"));

        let mut record = ForecastRecord::new(date(), 20.0, 10.0);
        record.temp_min = None;
        let err = DailyConditions::from_record(&record).unwrap_err();
        assert!(matches!(err, AdvisoryError::MissingField { ref field } if field == "temp_min"));
    }

    #[test]
    fn test_inverted_temperatures_tolerated() {
        let record = ForecastRecord::new(date(), 8.0, 12.0);
        let conditions = DailyConditions::from_record(&record).unwrap();
        assert_eq!(conditions.diurnal_range(), -4.0);
    }

    #[test]
    fn test_deserialize_provider_json() {
        let json = r#"{
            "date": "2024-03-15",
            "temp_max": 18,
            "temp_min": 9,
            "weather_description": "Light rain",
            "humidity": 80,
            "wind_scale": "3-4",
            "wind_dir": "NE",
            "uv_index": 3
        }"#;
        let record: ForecastRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.temp_max, Some(18.0));
        assert_eq!(record.weather.as_deref(), Some("Light rain"));
        assert_eq!(record.precipitation_probability, None);
        assert_eq!(record.precipitation_or_default(), 0.0);
    }

    #[rstest]
    #[case("Light rain", WeatherCondition::Rain)]
    #[case("Thunderstorm", WeatherCondition::Rain)]
    #[case("Sleet", WeatherCondition::Rain)]
    #[case("Scattered showers", WeatherCondition::Rain)]
    #[case("Rain and snow", WeatherCondition::Rain)]
    #[case("Light snow showers", WeatherCondition::Snow)]
    #[case("Thundersnow", WeatherCondition::Snow)]
    #[case("中雨", WeatherCondition::Rain)]
    #[case("Heavy Snow", WeatherCondition::Snow)]
    #[case("小雪", WeatherCondition::Snow)]
    #[case("Sunny", WeatherCondition::Clear)]
    #[case("晴", WeatherCondition::Clear)]
    #[case("Overcast", WeatherCondition::Other)]
    #[case("", WeatherCondition::Other)]
    fn test_condition_classification(
        #[case] description: &str,
        #[case] expected: WeatherCondition,
    ) {
        assert_eq!(WeatherCondition::classify(description), expected);
    }
}
