//! Read-only audit of a populated fitness store.
//!
//! Re-checks the dataset invariants (foreign-key integrity, fan-out,
//! nullability, sleep arithmetic, weight walk, value domains) against the
//! persisted rows.

pub mod checks;
pub mod engine;
pub mod errors;
pub mod model;
pub mod report;

pub use engine::AuditEngine;
pub use errors::EvalError;
pub use model::{AuditReport, CheckResult, TableMetrics};
pub use report::{render_report, write_report};
