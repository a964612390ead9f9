use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fitgen_core::Table;

use crate::errors::GenerationError;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Number of users to create.
    pub users: u32,
    pub workouts_per_user: u32,
    pub nutrition_logs_per_user: u32,
    pub sleep_logs_per_user: u32,
    pub health_metrics_per_user: u32,
    /// Seed for the random source. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
    /// Probability that a workout note mentions a stress keyword.
    pub stress_note_probability: f64,
    /// Probability that a nutrition log records caloric intake.
    pub caloric_intake_probability: f64,
    /// Reference date for trailing windows. Defaults to the local date.
    pub today: Option<NaiveDate>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            users: 100,
            workouts_per_user: 200,
            nutrition_logs_per_user: 200,
            sleep_logs_per_user: 200,
            health_metrics_per_user: 200,
            seed: None,
            stress_note_probability: 0.5,
            caloric_intake_probability: 0.5,
            today: None,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.users == 0 {
            return Err(GenerationError::InvalidOptions(
                "users must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("stress_note_probability", self.stress_note_probability),
            ("caloric_intake_probability", self.caloric_intake_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenerationError::InvalidOptions(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Atomic unit of generation work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Users,
    Workouts,
    Nutrition,
    Sleep,
    HealthMetrics,
}

impl UnitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Users => "users",
            UnitKind::Workouts => "workouts",
            UnitKind::Nutrition => "nutrition",
            UnitKind::Sleep => "sleep",
            UnitKind::HealthMetrics => "health_metrics",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit whose writes were discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitFailure {
    pub unit: UnitKind,
    /// Owning user for per-user units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub error: String,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub today: NaiveDate,
    /// Rows persisted by committed units.
    pub rows_committed: BTreeMap<Table, u64>,
    pub units_committed: u64,
    pub failures: Vec<UnitFailure>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, today: NaiveDate) -> Self {
        Self {
            run_id,
            seed,
            today,
            rows_committed: BTreeMap::new(),
            units_committed: 0,
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_commit(&mut self, rows: &[(Table, u64)]) {
        self.units_committed += 1;
        for (table, count) in rows {
            *self.rows_committed.entry(*table).or_insert(0) += count;
        }
    }

    pub fn record_failure(&mut self, unit: UnitKind, user_id: Option<i64>, error: String) {
        self.failures.push(UnitFailure {
            unit,
            user_id,
            error,
        });
    }

    pub fn rows(&self, table: Table) -> u64 {
        self.rows_committed.get(&table).copied().unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let options = GenerateOptions {
            stress_note_probability: 1.5,
            ..GenerateOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));
    }

    #[test]
    fn rejects_empty_user_set() {
        let options = GenerateOptions {
            users: 0,
            ..GenerateOptions::default()
        };
        assert!(options.validate().is_err());
        assert!(GenerateOptions::default().validate().is_ok());
    }

    #[test]
    fn report_accumulates_committed_rows() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut report = GenerationReport::new("run".to_string(), 7, today);
        report.record_commit(&[(Table::NutritionLogs, 2), (Table::FoodItems, 20)]);
        report.record_commit(&[(Table::NutritionLogs, 1), (Table::FoodItems, 10)]);
        report.record_failure(UnitKind::Sleep, Some(3), "boom".to_string());

        assert_eq!(report.units_committed, 2);
        assert_eq!(report.rows(Table::FoodItems), 30);
        assert_eq!(report.rows(Table::Users), 0);
        assert!(!report.is_complete());
    }

    #[test]
    fn options_fill_missing_fields_from_defaults() {
        let options: GenerateOptions =
            serde_json::from_str(r#"{"users": 3, "seed": 42}"#).expect("parse options");
        assert_eq!(options.users, 3);
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.workouts_per_user, 200);
        assert_eq!(options.stress_note_probability, 0.5);
    }
}
