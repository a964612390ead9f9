use std::time::Instant;

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use fitgen_core::dates::parse_date;
use fitgen_core::domain::{MAX_AGE, MIN_AGE};
use fitgen_core::{Table, age_on};

use crate::checks::sql_checks;
use crate::errors::EvalError;
use crate::model::{AuditReport, CheckResult, METRICS_VERSION, TableMetrics};

/// Audit a populated store against the dataset invariants.
#[derive(Debug, Clone)]
pub struct AuditEngine {
    pool: SqlitePool,
}

impl AuditEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run(&self) -> Result<AuditReport, EvalError> {
        let start = Instant::now();

        let mut tables = Vec::with_capacity(Table::ALL.len());
        for table in Table::ALL {
            let rows = self
                .count(&format!("SELECT COUNT(*) FROM {}", table.name()))
                .await?;
            tables.push(TableMetrics {
                table,
                rows_found: rows,
            });
        }

        let mut checks = Vec::new();
        for check in sql_checks() {
            let violations = self.count(&check.sql).await?;
            debug!(code = %check.code, violations, "check evaluated");
            checks.push(CheckResult {
                code: check.code,
                description: check.description,
                violations,
            });
        }
        checks.push(self.account_age_check().await?);

        let report = AuditReport {
            metrics_version: METRICS_VERSION.to_string(),
            tables,
            checks,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        if report.is_clean() {
            info!(duration_ms = report.duration_ms, "audit clean");
        } else {
            warn!(
                violations = report.total_violations(),
                duration_ms = report.duration_ms,
                "audit found violations"
            );
        }
        Ok(report)
    }

    /// Age at account creation, computed in Rust to count completed years.
    async fn account_age_check(&self) -> Result<CheckResult, EvalError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT DateOfBirth, AccountCreationDate FROM Users")
                .fetch_all(&self.pool)
                .await?;

        let mut violations = 0;
        for (dob, created) in rows {
            let in_window = match (parse_date(&dob), parse_date(&created)) {
                (Ok(dob), Ok(created)) => (MIN_AGE..=MAX_AGE).contains(&age_on(dob, created)),
                _ => false,
            };
            if !in_window {
                violations += 1;
            }
        }

        Ok(CheckResult {
            code: "users.age_at_creation".to_string(),
            description: format!("Users aged outside [{MIN_AGE}, {MAX_AGE}] at account creation"),
            violations,
        })
    }

    async fn count(&self, sql: &str) -> Result<u64, EvalError> {
        let value = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;
        u64::try_from(value)
            .map_err(|_| EvalError::InvalidDataset(format!("negative count from '{sql}'")))
    }
}
