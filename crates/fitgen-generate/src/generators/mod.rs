//! Entity generators.
//!
//! Each generator inserts exactly `count` rows scoped to its parent through
//! an open store unit. Only the nutrition chain consumes the identifiers the
//! store assigns.

pub mod health_metrics;
pub mod nutrition;
pub mod sleep;
pub mod users;
pub mod workouts;
