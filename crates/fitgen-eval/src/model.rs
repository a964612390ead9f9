use serde::{Deserialize, Serialize};

use fitgen_core::Table;

/// Audit contract version.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable audit of a fitness store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub metrics_version: String,
    pub tables: Vec<TableMetrics>,
    pub checks: Vec<CheckResult>,
    pub duration_ms: u64,
}

/// Row count for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetrics {
    pub table: Table,
    pub rows_found: u64,
}

/// Outcome of one invariant check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub code: String,
    pub description: String,
    pub violations: u64,
}

impl AuditReport {
    pub fn total_violations(&self) -> u64 {
        self.checks.iter().map(|check| check.violations).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total_violations() == 0
    }

    pub fn rows(&self, table: Table) -> u64 {
        self.tables
            .iter()
            .find(|metrics| metrics.table == table)
            .map(|metrics| metrics.rows_found)
            .unwrap_or(0)
    }

    pub fn check(&self, code: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.code == code)
    }
}
