use crate::dates::age_on;
use crate::domain::{self, FloatRange, IntRange};
use crate::error::{Error, Result};
use crate::model::{
    NewFoodItem, NewHealthMetric, NewMicronutrient, NewNutritionLog, NewRow, NewSleepLog,
    NewUser, NewWorkout,
};

/// Tolerance for the derived sleep duration, in hours.
pub const SLEEP_DURATION_TOLERANCE_H: f64 = 1e-9;

/// Validate that a row only carries values from its declared domains.
///
/// A failure here is a generator defect, never an expected runtime outcome.
pub fn validate_row(row: &NewRow) -> Result<()> {
    if let Some(parent_id) = row.parent_id() {
        if parent_id < 1 {
            return Err(Error::OutOfDomain(format!(
                "{}: parent identifier {parent_id} was never assigned",
                row.table()
            )));
        }
    }
    match row {
        NewRow::User(user) => validate_user(user),
        NewRow::Workout(workout) => validate_workout(workout),
        NewRow::NutritionLog(log) => validate_nutrition_log(log),
        NewRow::FoodItem(item) => validate_food_item(item),
        NewRow::Micronutrient(nutrient) => validate_micronutrient(nutrient),
        NewRow::SleepLog(sleep) => validate_sleep_log(sleep),
        NewRow::HealthMetric(metric) => validate_health_metric(metric),
    }
}

fn validate_user(user: &NewUser) -> Result<()> {
    one_of("Users.Gender", user.gender, domain::GENDERS)?;
    one_of("Users.FitnessGoals", user.fitness_goal, domain::FITNESS_GOALS)?;
    one_of(
        "Users.HealthConditions",
        user.health_condition,
        domain::HEALTH_CONDITIONS,
    )?;
    in_float("Users.Height", user.height, domain::HEIGHT_M)?;
    in_float("Users.Weight", user.weight, domain::BODY_WEIGHT_KG)?;

    let age = age_on(user.date_of_birth, user.account_creation_date);
    if !(domain::MIN_AGE..=domain::MAX_AGE).contains(&age) {
        return Err(Error::OutOfDomain(format!(
            "Users: age {age} at account creation outside [{}, {}]",
            domain::MIN_AGE,
            domain::MAX_AGE
        )));
    }
    Ok(())
}

fn validate_workout(workout: &NewWorkout) -> Result<()> {
    one_of("Workouts.WorkoutType", workout.workout_type, domain::WORKOUT_TYPES)?;
    one_of("Workouts.Intensity", workout.intensity, domain::INTENSITIES)?;
    in_float(
        "Workouts.Duration",
        workout.duration,
        domain::WORKOUT_DURATION_MIN,
    )?;
    in_float(
        "Workouts.CaloriesBurned",
        workout.calories_burned,
        domain::CALORIES_BURNED,
    )?;
    if !workout.notes.starts_with(domain::BASE_WORKOUT_NOTE) {
        return Err(Error::OutOfDomain(format!(
            "Workouts.Notes: unexpected note '{}'",
            workout.notes
        )));
    }
    Ok(())
}

fn validate_nutrition_log(log: &NewNutritionLog) -> Result<()> {
    if log.water_intake.is_some() != log.total_caloric_intake.is_some() {
        return Err(Error::OutOfDomain(
            "NutritionLogs: WaterIntake nullability must follow TotalCaloricIntake".to_string(),
        ));
    }
    if let Some(calories) = log.total_caloric_intake {
        in_float(
            "NutritionLogs.TotalCaloricIntake",
            calories,
            domain::CALORIC_INTAKE,
        )?;
    }
    if let Some(water) = log.water_intake {
        in_float("NutritionLogs.WaterIntake", water, domain::WATER_INTAKE_L)?;
    }
    Ok(())
}

fn validate_food_item(item: &NewFoodItem) -> Result<()> {
    one_of("FoodItems.FoodName", item.food_name, domain::FOOD_NAMES)?;
    in_float(
        "FoodItems.PortionSize",
        item.portion_size,
        domain::PORTION_SIZE_G,
    )?;
    in_float("FoodItems.Calories", item.calories, domain::FOOD_CALORIES)
}

fn validate_micronutrient(nutrient: &NewMicronutrient) -> Result<()> {
    one_of_int("Micronutrients.VitaminA", nutrient.vitamin_a, domain::VITAMIN_A)?;
    one_of_int("Micronutrients.VitaminC", nutrient.vitamin_c, domain::VITAMIN_C)?;
    one_of_int("Micronutrients.Calcium", nutrient.calcium, domain::CALCIUM)?;
    one_of_int("Micronutrients.Iron", nutrient.iron, domain::IRON)
}

fn validate_sleep_log(sleep: &NewSleepLog) -> Result<()> {
    if sleep.wake_up_time <= sleep.time_to_bed {
        return Err(Error::OutOfDomain(
            "SleepLogs: WakeUpTime must be after TimeToBed".to_string(),
        ));
    }
    let elapsed = (sleep.wake_up_time - sleep.time_to_bed).num_seconds() as f64 / 3600.0;
    if (elapsed - sleep.sleep_duration).abs() > SLEEP_DURATION_TOLERANCE_H {
        return Err(Error::OutOfDomain(format!(
            "SleepLogs: SleepDuration {} does not match elapsed {elapsed}",
            sleep.sleep_duration
        )));
    }
    in_float(
        "SleepLogs.SleepDuration",
        sleep.sleep_duration,
        domain::SLEEP_HOURS,
    )?;
    in_int(
        "SleepLogs.SleepQualityScore",
        sleep.sleep_quality_score,
        domain::SLEEP_QUALITY,
    )
}

fn validate_health_metric(metric: &NewHealthMetric) -> Result<()> {
    if !metric.weight.is_finite() || metric.weight < domain::WEIGHT_FLOOR_KG {
        return Err(Error::OutOfDomain(format!(
            "HealthMetrics.Weight: {} below {} kg",
            metric.weight,
            domain::WEIGHT_FLOOR_KG
        )));
    }
    in_float(
        "HealthMetrics.BodyFatPercentage",
        metric.body_fat_percentage,
        domain::BODY_FAT_PCT,
    )?;
    let (systolic, diastolic) = domain::parse_blood_pressure(&metric.blood_pressure)
        .ok_or_else(|| {
            Error::OutOfDomain(format!(
                "HealthMetrics.BloodPressure: malformed '{}'",
                metric.blood_pressure
            ))
        })?;
    in_int("HealthMetrics.BloodPressure systolic", systolic, domain::SYSTOLIC)?;
    in_int(
        "HealthMetrics.BloodPressure diastolic",
        diastolic,
        domain::DIASTOLIC,
    )?;
    in_float(
        "HealthMetrics.GlucoseLevels",
        metric.glucose_levels,
        domain::GLUCOSE,
    )?;
    in_float(
        "HealthMetrics.CholesterolLevels",
        metric.cholesterol_levels,
        domain::CHOLESTEROL,
    )
}

fn in_float(field: &str, value: f64, range: FloatRange) -> Result<()> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(Error::OutOfDomain(format!(
            "{field}: {value} outside [{}, {}]",
            range.min, range.max
        )))
    }
}

fn in_int(field: &str, value: i64, range: IntRange) -> Result<()> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(Error::OutOfDomain(format!(
            "{field}: {value} outside [{}, {}]",
            range.min, range.max
        )))
    }
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfDomain(format!("{field}: '{value}' not allowed")))
    }
}

fn one_of_int(field: &str, value: i64, allowed: &[i64]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfDomain(format!("{field}: {value} not allowed")))
    }
}
