//! Declarative rule tables behind the clothing, activity and health advice
//!
//! Each table is ordered. Clothing and activity tables are first-match;
//! health clauses are independent and accumulate.

use crate::models::WeatherCondition;
use crate::trends::{ComfortLevel, TrendLabel};

/// Morning wardrobe by minimum temperature. A band applies when the minimum
/// is below its upper bound; the last band has no bound.
pub const CLOTHING_BANDS: &[(Option<f64>, &str)] = &[
    (Some(-5.0), "🧥 Heavy down jacket + sweater + thermal underwear"),
    (Some(0.0), "🧥 Down jacket or padded coat + sweater"),
    (Some(5.0), "🧥 Heavy coat + sweater"),
    (Some(10.0), "🧥 Jacket or trench coat + hoodie/sweater"),
    (Some(15.0), "👔 Light jacket + long sleeves"),
    (Some(20.0), "👕 Long-sleeve shirt or hoodie"),
    (Some(25.0), "👕 T-shirt + light jacket (just in case)"),
    (None, "👕 T-shirt + shorts"),
];

/// Diurnal range at or above this calls for layering (°C)
pub const LAYERING_RANGE: f64 = 12.0;
/// Diurnal range at or above this calls for shedding a layer at midday (°C)
pub const MIDDAY_TIP_RANGE: f64 = 8.0;

/// Wardrobe for the morning minimum, which governs what to wear on leaving
#[must_use]
pub fn morning_wardrobe(temp_min: f64) -> &'static str {
    CLOTHING_BANDS
        .iter()
        .find(|(upper, _)| upper.is_none_or(|bound| temp_min < bound))
        .map_or("", |(_, wardrobe)| *wardrobe)
}

/// Inputs for the activity rules
#[derive(Debug, Clone, Copy)]
pub struct ActivityContext {
    pub precipitation_probability: f64,
    pub condition: WeatherCondition,
    pub comfort: Option<ComfortLevel>,
}

pub struct ActivityRule {
    pub applies: fn(&ActivityContext) -> bool,
    pub advice: &'static str,
}

pub const ACTIVITY_RULES: &[ActivityRule] = &[
    ActivityRule {
        applies: |ctx| ctx.precipitation_probability > 70.0,
        advice: "☔ Not a day for outdoor activities, exercise indoors or rest",
    },
    ActivityRule {
        applies: |ctx| ctx.condition.is_precipitating(),
        advice: "🏠 Outdoor plans are limited, try an indoor workout or a good book",
    },
    ActivityRule {
        applies: |ctx| ctx.comfort == Some(ComfortLevel::Comfortable),
        advice: "🎯 Pleasant weather, great for outdoor sports, outings and walks",
    },
    ActivityRule {
        applies: |ctx| ctx.comfort == Some(ComfortLevel::FairlyComfortable),
        advice: "🚶 Fine for moderate outdoor activity, avoid strenuous exercise",
    },
    ActivityRule {
        applies: |ctx| ctx.comfort == Some(ComfortLevel::Hot),
        advice: "🌡️ Hot day, keep outdoor activity to early morning or evening and guard against heat",
    },
    ActivityRule {
        applies: |ctx| ctx.comfort == Some(ComfortLevel::Cold),
        advice: "❄️ Cold day, keep warm if you head outdoors",
    },
];

pub const DEFAULT_ACTIVITY: &str = "🚶 Moderate outdoor activity is fine";

/// First matching activity advice
#[must_use]
pub fn activity_advice(ctx: &ActivityContext) -> &'static str {
    ACTIVITY_RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map_or(DEFAULT_ACTIVITY, |rule| rule.advice)
}

/// Inputs for the health clauses
#[derive(Debug, Clone, Copy)]
pub struct HealthContext {
    pub trend: Option<TrendLabel>,
    pub temp_max: f64,
    pub temp_min: f64,
}

pub struct HealthClause {
    pub applies: fn(&HealthContext) -> bool,
    pub clause: &'static str,
}

pub const HEALTH_CLAUSES: &[HealthClause] = &[
    HealthClause {
        applies: |ctx| ctx.trend.is_some_and(TrendLabel::is_falling),
        clause: "Temperatures are dropping, take care not to catch a cold",
    },
    HealthClause {
        applies: |ctx| ctx.trend.is_some_and(TrendLabel::is_rising),
        clause: "Temperatures are rising, stay hydrated",
    },
    HealthClause {
        applies: |ctx| ctx.temp_max - ctx.temp_min > 12.0,
        clause: "Large temperature swing, people with cardiovascular conditions should take care",
    },
    HealthClause {
        applies: |ctx| ctx.temp_min < 10.0,
        clause: "Chilly morning, warm up well before exercising outdoors",
    },
    HealthClause {
        applies: |ctx| ctx.temp_max > 30.0,
        clause: "Hot day, avoid prolonged sun exposure",
    },
];

pub const HEALTH_PREFIX: &str = "💊 ";
pub const HEALTH_SEPARATOR: &str = "; ";
pub const DEFAULT_HEALTH: &str = "Weather is mild, maintain your regular routine";

/// Every firing health clause, in table order
#[must_use]
pub fn health_clauses(ctx: &HealthContext) -> Vec<&'static str> {
    HEALTH_CLAUSES
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .map(|rule| rule.clause)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5.1, 0)]
    #[case(-5.0, 1)]
    #[case(-0.1, 1)]
    #[case(0.0, 2)]
    #[case(4.9, 2)]
    #[case(5.0, 3)]
    #[case(9.9, 3)]
    #[case(10.0, 4)]
    #[case(15.0, 5)]
    #[case(20.0, 6)]
    #[case(24.9, 6)]
    #[case(25.0, 7)]
    #[case(38.0, 7)]
    fn test_morning_wardrobe_bands(#[case] temp_min: f64, #[case] band: usize) {
        assert_eq!(morning_wardrobe(temp_min), CLOTHING_BANDS[band].1);
    }

    fn activity(
        probability: f64,
        description: &str,
        comfort: Option<ComfortLevel>,
    ) -> &'static str {
        activity_advice(&ActivityContext {
            precipitation_probability: probability,
            condition: WeatherCondition::classify(description),
            comfort,
        })
    }

    #[test]
    fn test_activity_first_match_wins() {
        // heavy rain probability beats everything else
        assert_eq!(
            activity(80.0, "Sunny", Some(ComfortLevel::Comfortable)),
            ACTIVITY_RULES[0].advice
        );
        // rain in the description beats a comfortable day
        assert_eq!(
            activity(10.0, "Light rain", Some(ComfortLevel::Comfortable)),
            ACTIVITY_RULES[1].advice
        );
        assert_eq!(
            activity(10.0, "Snow", Some(ComfortLevel::Hot)),
            ACTIVITY_RULES[1].advice
        );
    }

    #[rstest]
    #[case(Some(ComfortLevel::Comfortable), 2)]
    #[case(Some(ComfortLevel::FairlyComfortable), 3)]
    #[case(Some(ComfortLevel::Hot), 4)]
    #[case(Some(ComfortLevel::Cold), 5)]
    fn test_activity_by_comfort(#[case] comfort: Option<ComfortLevel>, #[case] rule: usize) {
        assert_eq!(activity(0.0, "Cloudy", comfort), ACTIVITY_RULES[rule].advice);
    }

    #[test]
    fn test_activity_fallback() {
        assert_eq!(activity(0.0, "Cloudy", None), DEFAULT_ACTIVITY);
    }

    #[test]
    fn test_health_clauses_accumulate() {
        let clauses = health_clauses(&HealthContext {
            trend: Some(TrendLabel::SignificantFall),
            temp_max: 32.0,
            temp_min: 8.0,
        });
        assert_eq!(
            clauses,
            vec![
                HEALTH_CLAUSES[0].clause,
                HEALTH_CLAUSES[2].clause,
                HEALTH_CLAUSES[3].clause,
                HEALTH_CLAUSES[4].clause,
            ]
        );
    }

    #[test]
    fn test_health_rise_and_none() {
        let clauses = health_clauses(&HealthContext {
            trend: Some(TrendLabel::SlightRise),
            temp_max: 22.0,
            temp_min: 14.0,
        });
        assert_eq!(clauses, vec![HEALTH_CLAUSES[1].clause]);

        let clauses = health_clauses(&HealthContext {
            trend: Some(TrendLabel::Stable),
            temp_max: 22.0,
            temp_min: 14.0,
        });
        assert!(clauses.is_empty());

        let clauses = health_clauses(&HealthContext {
            trend: None,
            temp_max: 22.0,
            temp_min: 10.0,
        });
        assert!(clauses.is_empty());
    }
}
