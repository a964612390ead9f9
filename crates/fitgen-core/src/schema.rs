//! Schema statements for the fitness store.
//!
//! Applied in order by the schema loader. Tables are dropped child-first and
//! recreated so every run starts from an empty schema.

pub const SCHEMA_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS Micronutrients",
    "DROP TABLE IF EXISTS FoodItems",
    "DROP TABLE IF EXISTS NutritionLogs",
    "DROP TABLE IF EXISTS Workouts",
    "DROP TABLE IF EXISTS SleepLogs",
    "DROP TABLE IF EXISTS HealthMetrics",
    "DROP TABLE IF EXISTS Users",
    r"CREATE TABLE Users (
        UserID INTEGER PRIMARY KEY AUTOINCREMENT,
        Username TEXT NOT NULL,
        Password TEXT NOT NULL,
        Email TEXT NOT NULL,
        DateOfBirth TEXT NOT NULL,
        Gender TEXT NOT NULL,
        Height REAL NOT NULL,
        Weight REAL NOT NULL,
        FitnessGoals TEXT,
        HealthConditions TEXT,
        AccountCreationDate TEXT NOT NULL
    )",
    r"CREATE TABLE Workouts (
        WorkoutID INTEGER PRIMARY KEY AUTOINCREMENT,
        UserID INTEGER NOT NULL,
        Date TEXT NOT NULL,
        WorkoutType TEXT NOT NULL,
        Duration REAL NOT NULL,
        Intensity TEXT NOT NULL,
        CaloriesBurned REAL NOT NULL,
        Notes TEXT,
        FOREIGN KEY (UserID) REFERENCES Users (UserID)
    )",
    r"CREATE TABLE NutritionLogs (
        NutritionLogID INTEGER PRIMARY KEY AUTOINCREMENT,
        UserID INTEGER NOT NULL,
        Date TEXT NOT NULL,
        TotalCaloricIntake REAL,
        WaterIntake REAL,
        FOREIGN KEY (UserID) REFERENCES Users (UserID)
    )",
    r"CREATE TABLE FoodItems (
        FoodItemID INTEGER PRIMARY KEY AUTOINCREMENT,
        NutritionLogID INTEGER NOT NULL,
        FoodName TEXT NOT NULL,
        PortionSize REAL NOT NULL,
        Calories REAL NOT NULL,
        FOREIGN KEY (NutritionLogID) REFERENCES NutritionLogs (NutritionLogID)
    )",
    r"CREATE TABLE Micronutrients (
        MicronutrientID INTEGER PRIMARY KEY AUTOINCREMENT,
        FoodItemID INTEGER NOT NULL,
        VitaminA INTEGER NOT NULL,
        VitaminC INTEGER NOT NULL,
        Calcium INTEGER NOT NULL,
        Iron INTEGER NOT NULL,
        FOREIGN KEY (FoodItemID) REFERENCES FoodItems (FoodItemID)
    )",
    r"CREATE TABLE SleepLogs (
        SleepLogID INTEGER PRIMARY KEY AUTOINCREMENT,
        UserID INTEGER NOT NULL,
        Date TEXT NOT NULL,
        TimeToBed TEXT NOT NULL,
        WakeUpTime TEXT NOT NULL,
        SleepDuration REAL NOT NULL,
        SleepQualityScore INTEGER NOT NULL,
        FOREIGN KEY (UserID) REFERENCES Users (UserID)
    )",
    r"CREATE TABLE HealthMetrics (
        HealthMetricID INTEGER PRIMARY KEY AUTOINCREMENT,
        UserID INTEGER NOT NULL,
        Date TEXT NOT NULL,
        Weight REAL NOT NULL,
        BodyFatPercentage REAL NOT NULL,
        BloodPressure TEXT NOT NULL,
        GlucoseLevels REAL NOT NULL,
        CholesterolLevels REAL NOT NULL,
        FOREIGN KEY (UserID) REFERENCES Users (UserID)
    )",
];

/// Split a schema script on `delimiter`, dropping blank segments.
///
/// The delimiter is not escaped or quoted; scripts must not use it inside
/// string literals.
pub fn split_statements(script: &str, delimiter: char) -> Vec<String> {
    script
        .split(delimiter)
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}
