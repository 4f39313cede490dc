//! Clothing, activity and health advice derived from a trend analysis

use serde::{Deserialize, Serialize};

use super::rules::{self, ActivityContext, HealthContext, LAYERING_RANGE, MIDDAY_TIP_RANGE};
use crate::trends::TrendAnalysis;

pub const NO_HISTORY_ACTIVITY: &str = "No activity advice available without recent history";
pub const NO_HISTORY_HEALTH: &str = "Keep an eye on changing weather";

/// Advice attached to an analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub clothing: String,
    pub activity: String,
    pub health: String,
}

/// Stateless composer of advice text
pub struct AdvisoryComposer;

impl AdvisoryComposer {
    /// Compose all advice for an analysis. Pure: the same analysis always
    /// yields the same suggestions.
    #[must_use]
    pub fn compose(analysis: &TrendAnalysis) -> SuggestionSet {
        let tomorrow = &analysis.tomorrow;
        let clothing = Self::clothing_suggestion(tomorrow.temp_max, tomorrow.temp_min);

        if analysis.is_without_history() {
            return SuggestionSet {
                clothing,
                activity: NO_HISTORY_ACTIVITY.to_string(),
                health: NO_HISTORY_HEALTH.to_string(),
            };
        }

        let activity = rules::activity_advice(&ActivityContext {
            precipitation_probability: tomorrow.precipitation_probability,
            condition: tomorrow.condition,
            comfort: analysis.comfort_level(),
        });

        let health = Self::health_suggestion(&HealthContext {
            trend: analysis.trend_label(),
            temp_max: tomorrow.temp_max,
            temp_min: tomorrow.temp_min,
        });

        SuggestionSet {
            clothing,
            activity: activity.to_string(),
            health,
        }
    }

    /// Wardrobe for the morning minimum, with a midday note when the
    /// diurnal range is large. Produces one of three shapes:
    /// layering guidance (range ≥ 12), a midday tip (range ≥ 8), or the
    /// wardrobe alone.
    #[must_use]
    pub fn clothing_suggestion(temp_max: f64, temp_min: f64) -> String {
        let range = temp_max - temp_min;
        let morning = rules::morning_wardrobe(temp_min);

        if range >= LAYERING_RANGE {
            let midday_tip = if temp_max >= 20.0 {
                format!("up to {temp_max:.0}°C at midday, strip down to long or short sleeves")
            } else if temp_max >= 15.0 {
                format!("up to {temp_max:.0}°C at midday, the coat can come off")
            } else {
                format!("up to {temp_max:.0}°C at midday, shed a layer if needed")
            };
            format!(
                "**Morning & evening**: {morning}\n**Temperature swing**: ⚠️ {range:.0}°C swing, {midday_tip}, dress in layers"
            )
        } else if range >= MIDDAY_TIP_RANGE {
            let midday_tip = if temp_max >= 20.0 {
                format!("{temp_max:.0}°C and warmer at midday, the outer layer can go")
            } else {
                format!("{temp_max:.0}°C at midday, shed a layer if needed")
            };
            format!("{morning}\n💡 {range:.0}°C swing, {midday_tip}")
        } else {
            morning.to_string()
        }
    }

    /// All firing health clauses joined into one sentence
    #[must_use]
    pub fn health_suggestion(ctx: &HealthContext) -> String {
        let clauses = rules::health_clauses(ctx);
        if clauses.is_empty() {
            format!("{}{}", rules::HEALTH_PREFIX, rules::DEFAULT_HEALTH)
        } else {
            format!(
                "{}{}",
                rules::HEALTH_PREFIX,
                clauses.join(rules::HEALTH_SEPARATOR)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::rules::{CLOTHING_BANDS, DEFAULT_ACTIVITY};
    use crate::config::AnalysisConfig;
    use crate::models::{ForecastRecord, History};
    use crate::trends::{TrendAnalyzer, TrendLabel};
    use chrono::{Duration, NaiveDate};
    use rstest::rstest;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    fn analyze(record: ForecastRecord, past_max: &[f64]) -> TrendAnalysis {
        let history = History::from_records(
            past_max
                .iter()
                .enumerate()
                .map(|(i, &max)| {
                    ForecastRecord::new(date() - Duration::days(i as i64 + 1), max, max - 6.0)
                        .with_weather("Cloudy")
                })
                .collect(),
        );
        TrendAnalyzer::new(AnalysisConfig::default())
            .unwrap()
            .analyze(&record, &history)
            .unwrap()
    }

    #[test]
    fn test_clothing_small_range_is_wardrobe_only() {
        let text = AdvisoryComposer::clothing_suggestion(22.0, 16.0);
        assert_eq!(text, CLOTHING_BANDS[5].1);
    }

    #[test]
    fn test_clothing_midday_tip() {
        let warm = AdvisoryComposer::clothing_suggestion(22.0, 13.0);
        assert!(warm.starts_with(CLOTHING_BANDS[4].1));
        assert!(warm.contains("💡 9°C swing"));
        assert!(warm.contains("22°C and warmer at midday"));

        let cool = AdvisoryComposer::clothing_suggestion(16.0, 8.0);
        assert!(cool.contains("16°C at midday, shed a layer"));
    }

    #[test]
    fn test_clothing_layering() {
        let text = AdvisoryComposer::clothing_suggestion(24.0, 8.0);
        assert!(text.starts_with("**Morning & evening**: "));
        assert!(text.contains(CLOTHING_BANDS[3].1));
        assert!(text.contains("16°C swing"));
        assert!(text.contains("strip down to long or short sleeves"));

        let mild = AdvisoryComposer::clothing_suggestion(17.0, 3.0);
        assert!(mild.contains("the coat can come off"));

        let cold = AdvisoryComposer::clothing_suggestion(6.0, -8.0);
        assert!(cold.contains(CLOTHING_BANDS[0].1));
        assert!(cold.contains("shed a layer if needed"));
    }

    #[rstest]
    #[case(20.0, 8.0, "**Morning & evening**: ", "12°C swing, up to 20°C at midday, strip down")]
    #[case(15.0, 3.0, "**Morning & evening**: ", "up to 15°C at midday, the coat can come off")]
    #[case(14.0, 2.0, "**Morning & evening**: ", "up to 14°C at midday, shed a layer if needed")]
    #[case(20.0, 12.0, CLOTHING_BANDS[4].1, "💡 8°C swing, 20°C and warmer at midday")]
    #[case(19.0, 11.0, CLOTHING_BANDS[4].1, "19°C at midday, shed a layer if needed")]
    fn test_clothing_shape_boundaries(
        #[case] temp_max: f64,
        #[case] temp_min: f64,
        #[case] prefix: &str,
        #[case] tip: &str,
    ) {
        let text = AdvisoryComposer::clothing_suggestion(temp_max, temp_min);
        assert!(text.starts_with(prefix), "{text}");
        assert!(text.contains(tip), "{text}");
    }

    #[test]
    fn test_clothing_ignores_other_fields() {
        let a = analyze(
            ForecastRecord::new(date(), 21.0, 12.0)
                .with_humidity(90.0)
                .with_weather("Heavy rain"),
            &[20.0],
        );
        let b = analyze(
            ForecastRecord::new(date(), 21.0, 12.0)
                .with_humidity(20.0)
                .with_weather("Sunny"),
            &[10.0, 30.0],
        );
        assert_eq!(a.suggestions.clothing, b.suggestions.clothing);
    }

    #[test]
    fn test_compose_without_history() {
        let analysis = TrendAnalyzer::new(AnalysisConfig::default())
            .unwrap()
            .analyze(&ForecastRecord::new(date(), 12.0, 2.0), &History::empty())
            .unwrap();
        let suggestions = AdvisoryComposer::compose(&analysis);

        assert_eq!(
            suggestions.clothing,
            AdvisoryComposer::clothing_suggestion(12.0, 2.0)
        );
        assert_eq!(suggestions.activity, NO_HISTORY_ACTIVITY);
        assert_eq!(suggestions.health, NO_HISTORY_HEALTH);
    }

    #[test]
    fn test_compose_with_history() {
        let analysis = analyze(
            ForecastRecord::new(date(), 24.0, 17.0)
                .with_humidity(55.0)
                .with_weather("Sunny"),
            &[20.0, 20.0, 20.0],
        );
        assert_eq!(analysis.trend_label(), Some(TrendLabel::SignificantRise));

        let suggestions = AdvisoryComposer::compose(&analysis);
        assert_eq!(
            suggestions.activity,
            "🎯 Pleasant weather, great for outdoor sports, outings and walks"
        );
        assert_eq!(suggestions.health, "💊 Temperatures are rising, stay hydrated");
    }

    #[test]
    fn test_compose_default_health_and_activity() {
        let mut analysis = analyze(ForecastRecord::new(date(), 22.0, 15.0), &[22.0]);
        analysis.comfort_analysis = None;

        let suggestions = AdvisoryComposer::compose(&analysis);
        assert_eq!(suggestions.activity, DEFAULT_ACTIVITY);
        assert_eq!(
            suggestions.health,
            "💊 Weather is mild, maintain your regular routine"
        );
    }

    #[test]
    fn test_health_clauses_joined() {
        let health = AdvisoryComposer::health_suggestion(&HealthContext {
            trend: Some(TrendLabel::SlightFall),
            temp_max: 15.0,
            temp_min: 2.0,
        });
        assert_eq!(
            health,
            "💊 Temperatures are dropping, take care not to catch a cold; \
             Large temperature swing, people with cardiovascular conditions should take care; \
             Chilly morning, warm up well before exercising outdoors"
        );
    }

    #[test]
    fn test_compose_is_idempotent() {
        let analysis = analyze(
            ForecastRecord::new(date(), 31.0, 18.0)
                .with_precipitation_probability(45.0)
                .with_weather("Cloudy"),
            &[25.0, 24.0],
        );
        let first = AdvisoryComposer::compose(&analysis);
        let second = AdvisoryComposer::compose(&analysis);
        assert_eq!(first, second);
        assert_eq!(first, analysis.suggestions);
    }
}
