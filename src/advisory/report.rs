//! Markdown report rendering
//!
//! Sections appear in a fixed order: overview, temperature trend,
//! precipitation, comfort, warnings, suggestions and footer. Sections whose
//! data is absent are left out. Temperatures render with one decimal place,
//! percentages and counts as integers.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::config::ReportConfig;
use crate::models::DailyConditions;
use crate::trends::{
    ComfortAnalysis, PrecipitationTrend, TemperatureTrend, TrendAnalysis, TrendLabel,
    WeatherWarning,
};

use super::SuggestionSet;

/// Short notification title for a forecast date
#[must_use]
pub fn report_title(date: NaiveDate, location: &str) -> String {
    format!("Tomorrow's weather in {location} {date}")
}

pub struct ReportRenderer {
    config: ReportConfig,
}

impl ReportRenderer {
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn title(&self, date: NaiveDate) -> String {
        report_title(date, &self.config.location_name)
    }

    /// Render the report stamped with the current local time
    #[must_use]
    pub fn render_now(&self, analysis: &TrendAnalysis) -> String {
        self.render(analysis, Local::now().naive_local())
    }

    /// Render the report. Identical inputs give byte-identical output.
    #[must_use]
    pub fn render(&self, analysis: &TrendAnalysis, generated_at: NaiveDateTime) -> String {
        let mut report = self.overview_section(&analysis.tomorrow);

        if let Some(trend) = &analysis.temperature_trend {
            report.push_str(&temperature_section(trend));
        }
        if let Some(precipitation) = &analysis.precipitation_trend {
            report.push_str(&precipitation_section(precipitation));
        }
        if let Some(comfort) = &analysis.comfort_analysis {
            report.push_str(&comfort_section(comfort));
        }
        if !analysis.weather_warnings.is_empty() {
            report.push_str(&warnings_section(&analysis.weather_warnings));
        }
        report.push_str(&suggestions_section(&analysis.suggestions));
        report.push_str(&self.footer(generated_at));

        report
    }

    fn overview_section(&self, tomorrow: &DailyConditions) -> String {
        format!(
            "# 🌤️ Tomorrow's Weather for {location}\n\n\
             ## 📅 Overview\n\
             **Date**: {date}  \n\
             **Weather**: {weather}  \n\
             **Temperature**: {min:.1}°C ~ {max:.1}°C  \n\
             **Humidity**: {humidity:.0}%  \n\
             **Wind**: {wind}\n\n",
            location = self.config.location_name,
            date = tomorrow.date,
            weather = tomorrow.weather,
            min = tomorrow.temp_min,
            max = tomorrow.temp_max,
            humidity = tomorrow.humidity,
            wind = format_wind(tomorrow),
        )
    }

    fn footer(&self, generated_at: NaiveDateTime) -> String {
        format!(
            "---\n*Data source: {}*  \n*Generated at: {}*\n",
            self.config.data_source,
            generated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

fn format_wind(tomorrow: &DailyConditions) -> String {
    let parts: Vec<&str> = [tomorrow.wind_dir.as_str(), tomorrow.wind_scale.as_str()]
        .into_iter()
        .filter(|part| *part != "-" && !part.is_empty())
        .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" ")
    }
}

fn temperature_section(trend: &TemperatureTrend) -> String {
    let mut section = format!("## 📊 Temperature Trend\n**Trend**: {}  \n", trend.trend);
    if trend.trend != TrendLabel::NoHistory {
        section.push_str(&format!(
            "**Against recent average**: high {:+.1}°C, low {:+.1}°C  \n\
             **Diurnal range**: {:.1}°C  \n\
             **Recent average range**: {:.1}°C  \n\
             **Volatility**: {} (σ {:.1}°C)  \n",
            trend.max_temp_change,
            trend.min_temp_change,
            trend.tomorrow_diurnal_range,
            trend.avg_historical_diurnal_range,
            trend.volatility,
            trend.temp_stddev,
        ));
    }
    section.push('\n');
    section
}

fn precipitation_section(precipitation: &PrecipitationTrend) -> String {
    format!(
        "## 🌧️ Precipitation\n\
         **Probability**: {:.0}%  \n\
         **Outlook**: {}  \n\
         **Recent rainy days**: {}  \n\n",
        precipitation.probability, precipitation.trend, precipitation.recent_rainy_days
    )
}

fn comfort_section(comfort: &ComfortAnalysis) -> String {
    format!(
        "## 🌡️ Comfort\n\
         **Apparent temperature**: {:.1}°C  \n\
         **Comfort level**: {}  \n\n",
        comfort.apparent_temperature, comfort.comfort_level
    )
}

fn warnings_section(warnings: &[WeatherWarning]) -> String {
    let mut section = String::from("## ⚠️ Weather Warnings\n");
    for warning in warnings {
        section.push_str(&format!("{warning}\n\n"));
    }
    section
}

fn suggestions_section(suggestions: &SuggestionSet) -> String {
    format!(
        "## 💡 Suggestions\n\n\
         **Clothing**  \n{}\n\n\
         **Activity**  \n{}\n\n\
         **Health**  \n{}\n\n",
        suggestions.clothing, suggestions.activity, suggestions.health
    )
}
