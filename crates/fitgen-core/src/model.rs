use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The seven tables of the fitness store, parents before children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Table {
    Users,
    Workouts,
    NutritionLogs,
    FoodItems,
    Micronutrients,
    SleepLogs,
    HealthMetrics,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Users,
        Table::Workouts,
        Table::NutritionLogs,
        Table::FoodItems,
        Table::Micronutrients,
        Table::SleepLogs,
        Table::HealthMetrics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "Users",
            Table::Workouts => "Workouts",
            Table::NutritionLogs => "NutritionLogs",
            Table::FoodItems => "FoodItems",
            Table::Micronutrients => "Micronutrients",
            Table::SleepLogs => "SleepLogs",
            Table::HealthMetrics => "HealthMetrics",
        }
    }

    /// Surrogate key column.
    pub fn id_column(self) -> &'static str {
        match self {
            Table::Users => "UserID",
            Table::Workouts => "WorkoutID",
            Table::NutritionLogs => "NutritionLogID",
            Table::FoodItems => "FoodItemID",
            Table::Micronutrients => "MicronutrientID",
            Table::SleepLogs => "SleepLogID",
            Table::HealthMetrics => "HealthMetricID",
        }
    }

    /// Owning table, if any.
    pub fn parent(self) -> Option<Table> {
        match self {
            Table::Users => None,
            Table::Workouts | Table::NutritionLogs | Table::SleepLogs | Table::HealthMetrics => {
                Some(Table::Users)
            }
            Table::FoodItems => Some(Table::NutritionLogs),
            Table::Micronutrients => Some(Table::FoodItems),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: &'static str,
    pub height: f64,
    pub weight: f64,
    pub fitness_goal: &'static str,
    pub health_condition: &'static str,
    pub account_creation_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub user_id: i64,
    pub date: NaiveDate,
    pub workout_type: &'static str,
    pub duration: f64,
    pub intensity: &'static str,
    pub calories_burned: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNutritionLog {
    pub user_id: i64,
    pub date: NaiveDate,
    pub total_caloric_intake: Option<f64>,
    /// Present only when `total_caloric_intake` is present.
    pub water_intake: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodItem {
    pub nutrition_log_id: i64,
    pub food_name: &'static str,
    pub portion_size: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMicronutrient {
    pub food_item_id: i64,
    pub vitamin_a: i64,
    pub vitamin_c: i64,
    pub calcium: i64,
    pub iron: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSleepLog {
    pub user_id: i64,
    pub date: NaiveDate,
    pub time_to_bed: NaiveDateTime,
    pub wake_up_time: NaiveDateTime,
    /// Hours between `time_to_bed` and `wake_up_time`.
    pub sleep_duration: f64,
    pub sleep_quality_score: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHealthMetric {
    pub user_id: i64,
    pub date: NaiveDate,
    pub weight: f64,
    pub body_fat_percentage: f64,
    pub blood_pressure: String,
    pub glucose_levels: f64,
    pub cholesterol_levels: f64,
}

/// A row ready for insertion; the store assigns its identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum NewRow {
    User(NewUser),
    Workout(NewWorkout),
    NutritionLog(NewNutritionLog),
    FoodItem(NewFoodItem),
    Micronutrient(NewMicronutrient),
    SleepLog(NewSleepLog),
    HealthMetric(NewHealthMetric),
}

impl NewRow {
    pub fn table(&self) -> Table {
        match self {
            NewRow::User(_) => Table::Users,
            NewRow::Workout(_) => Table::Workouts,
            NewRow::NutritionLog(_) => Table::NutritionLogs,
            NewRow::FoodItem(_) => Table::FoodItems,
            NewRow::Micronutrient(_) => Table::Micronutrients,
            NewRow::SleepLog(_) => Table::SleepLogs,
            NewRow::HealthMetric(_) => Table::HealthMetrics,
        }
    }

    /// Identifier of the owning row, if the row has a parent.
    pub fn parent_id(&self) -> Option<i64> {
        match self {
            NewRow::User(_) => None,
            NewRow::Workout(row) => Some(row.user_id),
            NewRow::NutritionLog(row) => Some(row.user_id),
            NewRow::FoodItem(row) => Some(row.nutrition_log_id),
            NewRow::Micronutrient(row) => Some(row.food_item_id),
            NewRow::SleepLog(row) => Some(row.user_id),
            NewRow::HealthMetric(row) => Some(row.user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_precede_children_in_table_order() {
        for (index, table) in Table::ALL.iter().enumerate() {
            if let Some(parent) = table.parent() {
                let parent_index = Table::ALL
                    .iter()
                    .position(|candidate| *candidate == parent)
                    .expect("parent listed");
                assert!(parent_index < index, "{table} listed before {parent}");
            }
        }
    }

    #[test]
    fn table_serializes_as_its_name() {
        let value = serde_json::to_value(Table::FoodItems).expect("serialize");
        assert_eq!(value, serde_json::json!("FoodItems"));
        assert_eq!(Table::FoodItems.to_string(), "FoodItems");
    }
}
