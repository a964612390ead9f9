use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use fitgen_core::{NewRow, format_date, format_timestamp, validate_row};

use super::{Store, StoreError, StoreUnit};

/// SQLite-backed store holding a single-connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url`.
    ///
    /// Foreign keys are declared by the schema but not enforced; integrity is
    /// the generator's responsibility and is checked by the audit.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for SqliteStore {
    type Unit = SqliteUnit;

    async fn execute_statement(&self, statement: &str) -> Result<(), StoreError> {
        sqlx::query(statement).execute(&self.pool).await?;
        Ok(())
    }

    async fn begin(&self) -> Result<Self::Unit, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(SqliteUnit { tx })
    }

    async fn user_ids(&self) -> Result<Vec<i64>, StoreError> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT UserID FROM Users ORDER BY UserID")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}

/// One SQLite transaction.
pub struct SqliteUnit {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl StoreUnit for SqliteUnit {
    async fn insert(&mut self, row: &NewRow) -> Result<i64, StoreError> {
        validate_row(row)?;

        let query = match row {
            NewRow::User(user) => sqlx::query(
                r"
                INSERT INTO Users (Username, Password, Email, DateOfBirth, Gender, Height, Weight, FitnessGoals, HealthConditions, AccountCreationDate)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.email)
            .bind(format_date(user.date_of_birth))
            .bind(user.gender)
            .bind(user.height)
            .bind(user.weight)
            .bind(user.fitness_goal)
            .bind(user.health_condition)
            .bind(format_date(user.account_creation_date)),
            NewRow::Workout(workout) => sqlx::query(
                r"
                INSERT INTO Workouts (UserID, Date, WorkoutType, Duration, Intensity, CaloriesBurned, Notes)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(workout.user_id)
            .bind(format_date(workout.date))
            .bind(workout.workout_type)
            .bind(workout.duration)
            .bind(workout.intensity)
            .bind(workout.calories_burned)
            .bind(&workout.notes),
            NewRow::NutritionLog(log) => sqlx::query(
                r"
                INSERT INTO NutritionLogs (UserID, Date, TotalCaloricIntake, WaterIntake)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(log.user_id)
            .bind(format_date(log.date))
            .bind(log.total_caloric_intake)
            .bind(log.water_intake),
            NewRow::FoodItem(item) => sqlx::query(
                r"
                INSERT INTO FoodItems (NutritionLogID, FoodName, PortionSize, Calories)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(item.nutrition_log_id)
            .bind(item.food_name)
            .bind(item.portion_size)
            .bind(item.calories),
            NewRow::Micronutrient(nutrient) => sqlx::query(
                r"
                INSERT INTO Micronutrients (FoodItemID, VitaminA, VitaminC, Calcium, Iron)
                VALUES (?, ?, ?, ?, ?)
                ",
            )
            .bind(nutrient.food_item_id)
            .bind(nutrient.vitamin_a)
            .bind(nutrient.vitamin_c)
            .bind(nutrient.calcium)
            .bind(nutrient.iron),
            NewRow::SleepLog(sleep) => sqlx::query(
                r"
                INSERT INTO SleepLogs (UserID, Date, TimeToBed, WakeUpTime, SleepDuration, SleepQualityScore)
                VALUES (?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(sleep.user_id)
            .bind(format_date(sleep.date))
            .bind(format_timestamp(sleep.time_to_bed))
            .bind(format_timestamp(sleep.wake_up_time))
            .bind(sleep.sleep_duration)
            .bind(sleep.sleep_quality_score),
            NewRow::HealthMetric(metric) => sqlx::query(
                r"
                INSERT INTO HealthMetrics (UserID, Date, Weight, BodyFatPercentage, BloodPressure, GlucoseLevels, CholesterolLevels)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(metric.user_id)
            .bind(format_date(metric.date))
            .bind(metric.weight)
            .bind(metric.body_fat_percentage)
            .bind(&metric.blood_pressure)
            .bind(metric.glucose_levels)
            .bind(metric.cholesterol_levels),
        };

        let result = query.execute(&mut *self.tx).await?;
        Ok(result.last_insert_rowid())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
