//! Core contracts and helpers for fitgen.
//!
//! This crate defines the health-and-fitness data model, the attribute value
//! domains, the built-in schema statements and the validation helpers shared
//! by the generator, the audit and the CLI.

pub mod dates;
pub mod domain;
pub mod error;
pub mod model;
pub mod schema;
pub mod validation;

pub use dates::{DATE_FORMAT, TIMESTAMP_FORMAT, add_years, age_on, format_date, format_timestamp};
pub use domain::{FloatRange, IntRange};
pub use error::{Error, Result};
pub use model::{
    NewFoodItem, NewHealthMetric, NewMicronutrient, NewNutritionLog, NewRow, NewSleepLog,
    NewUser, NewWorkout, Table,
};
pub use schema::{SCHEMA_STATEMENTS, split_statements};
pub use validation::validate_row;

/// Current contract version for the fitgen schema.
pub const SCHEMA_VERSION: &str = "0.1";
