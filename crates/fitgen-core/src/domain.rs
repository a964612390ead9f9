//! Attribute value domains for every generated column.
//!
//! Generators sample only from these constants, and the audit checks stored
//! rows against the same values.

use serde::{Deserialize, Serialize};

/// Inclusive continuous range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

impl FloatRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

// Users
pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 65;
pub const GENDERS: &[&str] = &["Male", "Female", "Other"];
pub const HEIGHT_M: FloatRange = FloatRange::new(1.5, 2.0);
pub const BODY_WEIGHT_KG: FloatRange = FloatRange::new(50.0, 100.0);
pub const FITNESS_GOALS: &[&str] = &[
    "Lose weight",
    "Build muscle",
    "Improve stamina",
    "Increase flexibility",
];
pub const HEALTH_CONDITIONS: &[&str] = &["None", "Asthma", "Diabetes", "Hypertension"];
pub const PASSWORD_LEN: std::ops::Range<usize> = 8..20;

// Workouts
pub const WORKOUT_TYPES: &[&str] = &["Cardio", "Strength", "Flexibility", "Aerobic", "Anaerobic"];
pub const WORKOUT_DURATION_MIN: FloatRange = FloatRange::new(15.0, 120.0);
pub const INTENSITIES: &[&str] = &["Low", "Medium", "High"];
pub const CALORIES_BURNED: FloatRange = FloatRange::new(100.0, 1000.0);
pub const STRESS_KEYWORDS: &[&str] = &["stress", "pressure", "tense", "demanding", "overwhelm"];
pub const BASE_WORKOUT_NOTE: &str = "Good workout session.";

/// Note attached to a workout, optionally mentioning a stress keyword.
pub fn workout_note(stress_keyword: Option<&str>) -> String {
    match stress_keyword {
        Some(keyword) => format!("{BASE_WORKOUT_NOTE} Felt {keyword} due to workload."),
        None => BASE_WORKOUT_NOTE.to_string(),
    }
}

// Nutrition
pub const CALORIC_INTAKE: FloatRange = FloatRange::new(1000.0, 3000.0);
pub const WATER_INTAKE_L: FloatRange = FloatRange::new(1.0, 4.0);
pub const FOOD_ITEMS_PER_LOG: u32 = 10;
pub const FOOD_NAMES: &[&str] = &[
    "Pasta", "Pizza", "Burger", "Salad", "Steak", "Fish", "Chicken", "Sandwich", "Rice", "Beans",
];
pub const PORTION_SIZE_G: FloatRange = FloatRange::new(100.0, 500.0);
pub const FOOD_CALORIES: FloatRange = FloatRange::new(100.0, 800.0);
pub const VITAMIN_A: &[i64] = &[0, 500, 1000];
pub const VITAMIN_C: &[i64] = &[0, 60, 120];
pub const CALCIUM: &[i64] = &[0, 900, 1800];
pub const IRON: &[i64] = &[0, 14, 28];

// Sleep
pub const BEDTIME_HOUR: IntRange = IntRange::new(21, 23);
pub const BEDTIME_MINUTE: IntRange = IntRange::new(0, 59);
pub const SLEEP_HOURS: FloatRange = FloatRange::new(4.0, 10.0);
pub const SLEEP_QUALITY: IntRange = IntRange::new(1, 10);

// Health metrics
pub const WEIGHT_STEP_KG: FloatRange = FloatRange::new(-1.0, 1.0);
/// Lowest weight the health-metric walk may reach; steps below it reflect.
pub const WEIGHT_FLOOR_KG: f64 = 30.0;
pub const BODY_FAT_PCT: FloatRange = FloatRange::new(10.0, 30.0);
pub const SYSTOLIC: IntRange = IntRange::new(110, 140);
pub const DIASTOLIC: IntRange = IntRange::new(70, 90);
pub const GLUCOSE: FloatRange = FloatRange::new(70.0, 130.0);
pub const CHOLESTEROL: FloatRange = FloatRange::new(150.0, 250.0);

/// Blood pressure reading rendered as `systolic/diastolic`.
pub fn blood_pressure(systolic: i64, diastolic: i64) -> String {
    format!("{systolic}/{diastolic}")
}

/// Parse a `systolic/diastolic` reading.
pub fn parse_blood_pressure(value: &str) -> Option<(i64, i64)> {
    let (systolic, diastolic) = value.split_once('/')?;
    Some((systolic.trim().parse().ok()?, diastolic.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_inclusive() {
        assert!(HEIGHT_M.contains(1.5));
        assert!(HEIGHT_M.contains(2.0));
        assert!(!HEIGHT_M.contains(2.0001));
        assert!(!HEIGHT_M.contains(f64::NAN));
        assert!(SLEEP_QUALITY.contains(10));
        assert!(!SLEEP_QUALITY.contains(0));
    }

    #[test]
    fn workout_note_mentions_keyword() {
        assert_eq!(workout_note(None), "Good workout session.");
        assert_eq!(
            workout_note(Some("tense")),
            "Good workout session. Felt tense due to workload."
        );
    }

    #[test]
    fn blood_pressure_parses_back() {
        assert_eq!(parse_blood_pressure(&blood_pressure(120, 80)), Some((120, 80)));
        assert_eq!(parse_blood_pressure("120-80"), None);
    }
}
