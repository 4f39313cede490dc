//! Data models for the advisory engine
//!
//! - Weather: daily forecast/observation records and their validated form
//! - History: the most-recent-first window of past records

pub mod history;
pub mod weather;

pub use history::History;
pub use weather::{DailyConditions, ForecastRecord, HistoricalRecord, WeatherCondition};
