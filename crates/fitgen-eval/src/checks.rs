//! SQL invariant checks. Each query counts violating rows.

use fitgen_core::Table;
use fitgen_core::domain::{self, FloatRange, IntRange};

/// Weight walk tolerance on top of the 1 kg step bound.
const WEIGHT_STEP_EPSILON: f64 = 1e-9;
/// Sleep duration tolerance, in hours.
const SLEEP_EPSILON_H: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct SqlCheck {
    pub code: String,
    pub description: String,
    pub sql: String,
}

impl SqlCheck {
    fn new(code: impl Into<String>, description: impl Into<String>, sql: String) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            sql,
        }
    }
}

/// All SQL-expressible checks, structural ones first.
pub fn sql_checks() -> Vec<SqlCheck> {
    let mut checks = Vec::new();
    checks.extend(orphan_checks());
    checks.extend(structural_checks());
    checks.extend(domain_checks());
    checks
}

fn orphan_checks() -> Vec<SqlCheck> {
    Table::ALL
        .iter()
        .filter_map(|&table| table.parent().map(|parent| (table, parent)))
        .map(|(table, parent)| {
            SqlCheck::new(
                format!("orphans.{}", table.name()),
                format!("{table} rows whose {} does not resolve", parent.id_column()),
                format!(
                    "SELECT COUNT(*) FROM {child} c LEFT JOIN {parent} p ON p.{key} = c.{key} WHERE p.{key} IS NULL",
                    child = table.name(),
                    parent = parent.name(),
                    key = parent.id_column(),
                ),
            )
        })
        .collect()
}

fn structural_checks() -> Vec<SqlCheck> {
    vec![
        SqlCheck::new(
            "fan_out.food_items",
            format!(
                "NutritionLogs without exactly {} FoodItems",
                domain::FOOD_ITEMS_PER_LOG
            ),
            format!(
                "SELECT COUNT(*) FROM NutritionLogs n WHERE (SELECT COUNT(*) FROM FoodItems f WHERE f.NutritionLogID = n.NutritionLogID) <> {}",
                domain::FOOD_ITEMS_PER_LOG
            ),
        ),
        SqlCheck::new(
            "fan_out.micronutrients",
            "FoodItems without exactly one Micronutrients row",
            "SELECT COUNT(*) FROM FoodItems f WHERE (SELECT COUNT(*) FROM Micronutrients m WHERE m.FoodItemID = f.FoodItemID) <> 1".to_string(),
        ),
        SqlCheck::new(
            "nullability.water_intake",
            "NutritionLogs whose WaterIntake nullability differs from TotalCaloricIntake",
            "SELECT COUNT(*) FROM NutritionLogs WHERE (WaterIntake IS NULL) <> (TotalCaloricIntake IS NULL)".to_string(),
        ),
        SqlCheck::new(
            "sleep.order",
            "SleepLogs waking up before going to bed",
            "SELECT COUNT(*) FROM SleepLogs WHERE WakeUpTime <= TimeToBed".to_string(),
        ),
        SqlCheck::new(
            "sleep.duration",
            "SleepLogs whose SleepDuration differs from the wall-clock difference",
            format!(
                "SELECT COUNT(*) FROM SleepLogs WHERE abs((CAST(strftime('%s', WakeUpTime) AS INTEGER) - CAST(strftime('%s', TimeToBed) AS INTEGER)) / 3600.0 - SleepDuration) > {SLEEP_EPSILON_H:e}"
            ),
        ),
        SqlCheck::new(
            "health.weight_walk",
            "consecutive HealthMetrics weights of one user moving more than 1 kg",
            format!(
                "SELECT COUNT(*) FROM (SELECT Weight - LAG(Weight) OVER (PARTITION BY UserID ORDER BY HealthMetricID) AS delta FROM HealthMetrics) WHERE delta IS NOT NULL AND abs(delta) > {}",
                domain::WEIGHT_STEP_KG.max + WEIGHT_STEP_EPSILON
            ),
        ),
    ]
}

fn domain_checks() -> Vec<SqlCheck> {
    vec![
        text_in(Table::Users, "Gender", domain::GENDERS),
        float_in(Table::Users, "Height", domain::HEIGHT_M),
        float_in(Table::Users, "Weight", domain::BODY_WEIGHT_KG),
        text_in(Table::Users, "FitnessGoals", domain::FITNESS_GOALS),
        text_in(Table::Users, "HealthConditions", domain::HEALTH_CONDITIONS),
        text_in(Table::Workouts, "WorkoutType", domain::WORKOUT_TYPES),
        float_in(Table::Workouts, "Duration", domain::WORKOUT_DURATION_MIN),
        text_in(Table::Workouts, "Intensity", domain::INTENSITIES),
        float_in(Table::Workouts, "CaloriesBurned", domain::CALORIES_BURNED),
        float_in(Table::NutritionLogs, "TotalCaloricIntake", domain::CALORIC_INTAKE),
        float_in(Table::NutritionLogs, "WaterIntake", domain::WATER_INTAKE_L),
        text_in(Table::FoodItems, "FoodName", domain::FOOD_NAMES),
        float_in(Table::FoodItems, "PortionSize", domain::PORTION_SIZE_G),
        float_in(Table::FoodItems, "Calories", domain::FOOD_CALORIES),
        int_in(Table::Micronutrients, "VitaminA", domain::VITAMIN_A),
        int_in(Table::Micronutrients, "VitaminC", domain::VITAMIN_C),
        int_in(Table::Micronutrients, "Calcium", domain::CALCIUM),
        int_in(Table::Micronutrients, "Iron", domain::IRON),
        float_in(Table::SleepLogs, "SleepDuration", domain::SLEEP_HOURS),
        int_range(Table::SleepLogs, "SleepQualityScore", domain::SLEEP_QUALITY),
        float_at_least(Table::HealthMetrics, "Weight", domain::WEIGHT_FLOOR_KG),
        float_in(Table::HealthMetrics, "BodyFatPercentage", domain::BODY_FAT_PCT),
        int_range_expr(
            Table::HealthMetrics,
            "BloodPressure.systolic",
            "CAST(substr(BloodPressure, 1, instr(BloodPressure, '/') - 1) AS INTEGER)",
            domain::SYSTOLIC,
        ),
        int_range_expr(
            Table::HealthMetrics,
            "BloodPressure.diastolic",
            "CAST(substr(BloodPressure, instr(BloodPressure, '/') + 1) AS INTEGER)",
            domain::DIASTOLIC,
        ),
        float_in(Table::HealthMetrics, "GlucoseLevels", domain::GLUCOSE),
        float_in(Table::HealthMetrics, "CholesterolLevels", domain::CHOLESTEROL),
    ]
}

fn text_in(table: Table, column: &str, allowed: &[&str]) -> SqlCheck {
    let list = allowed
        .iter()
        .map(|value| format!("'{}'", value.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ");
    SqlCheck::new(
        format!("domain.{}.{column}", table.name()),
        format!("{table}.{column} outside its categorical domain"),
        format!(
            "SELECT COUNT(*) FROM {} WHERE {column} IS NOT NULL AND {column} NOT IN ({list})",
            table.name()
        ),
    )
}

fn int_in(table: Table, column: &str, allowed: &[i64]) -> SqlCheck {
    let list = allowed
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    SqlCheck::new(
        format!("domain.{}.{column}", table.name()),
        format!("{table}.{column} outside its discrete set"),
        format!(
            "SELECT COUNT(*) FROM {} WHERE {column} NOT IN ({list})",
            table.name()
        ),
    )
}

fn float_in(table: Table, column: &str, range: FloatRange) -> SqlCheck {
    SqlCheck::new(
        format!("domain.{}.{column}", table.name()),
        format!("{table}.{column} outside [{}, {}]", range.min, range.max),
        format!(
            "SELECT COUNT(*) FROM {} WHERE {column} IS NOT NULL AND ({column} < {min:?} OR {column} > {max:?})",
            table.name(),
            min = range.min,
            max = range.max,
        ),
    )
}

fn float_at_least(table: Table, column: &str, floor: f64) -> SqlCheck {
    SqlCheck::new(
        format!("domain.{}.{column}", table.name()),
        format!("{table}.{column} below {floor}"),
        format!(
            "SELECT COUNT(*) FROM {} WHERE {column} IS NULL OR {column} < {floor:?}",
            table.name()
        ),
    )
}

fn int_range(table: Table, column: &str, range: IntRange) -> SqlCheck {
    int_range_expr(table, column, column, range)
}

fn int_range_expr(table: Table, label: &str, expr: &str, range: IntRange) -> SqlCheck {
    SqlCheck::new(
        format!("domain.{}.{label}", table.name()),
        format!("{table}.{label} outside [{}, {}]", range.min, range.max),
        format!(
            "SELECT COUNT(*) FROM {} WHERE {expr} < {} OR {expr} > {}",
            table.name(),
            range.min,
            range.max
        ),
    )
}
