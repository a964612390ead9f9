use std::fs::{OpenOptions, create_dir_all};
use std::path::Path;

use crate::errors::EvalError;
use crate::model::AuditReport;

/// Write the report as pretty JSON, creating parent directories.
pub fn write_report(path: &Path, report: &AuditReport) -> Result<(), EvalError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Plain-text summary of an audit, violations first.
pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();
    out.push_str("tables:\n");
    for metrics in &report.tables {
        out.push_str(&format!("  {:<16} {}\n", metrics.table.name(), metrics.rows_found));
    }

    let failing: Vec<_> = report
        .checks
        .iter()
        .filter(|check| check.violations > 0)
        .collect();
    if failing.is_empty() {
        out.push_str(&format!("checks: {} passed\n", report.checks.len()));
    } else {
        out.push_str(&format!(
            "checks: {} failed of {}\n",
            failing.len(),
            report.checks.len()
        ));
        for check in failing {
            out.push_str(&format!(
                "  {} ({} rows): {}\n",
                check.code, check.violations, check.description
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use fitgen_core::Table;

    use super::*;
    use crate::model::{CheckResult, METRICS_VERSION, TableMetrics};

    fn report(violations: u64) -> AuditReport {
        AuditReport {
            metrics_version: METRICS_VERSION.to_string(),
            tables: vec![TableMetrics {
                table: Table::Users,
                rows_found: 3,
            }],
            checks: vec![CheckResult {
                code: "sleep.order".to_string(),
                description: "SleepLogs waking up before going to bed".to_string(),
                violations,
            }],
            duration_ms: 1,
        }
    }

    #[test]
    fn clean_report_lists_pass_count() {
        let text = render_report(&report(0));
        assert!(text.contains("Users"));
        assert!(text.contains("checks: 1 passed"));
    }

    #[test]
    fn failing_checks_are_listed() {
        let text = render_report(&report(2));
        assert!(text.contains("checks: 1 failed of 1"));
        assert!(text.contains("sleep.order (2 rows)"));
    }

    #[test]
    fn written_report_reads_back() {
        let dir = std::env::temp_dir().join(format!("fitgen_report_{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("audit.json");
        write_report(&path, &report(4)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let decoded: AuditReport = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded.total_violations(), 4);
    }
}
