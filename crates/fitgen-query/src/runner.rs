use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Executor, Row, SqlitePool, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::catalog::QueryCatalog;
use crate::errors::QueryError;
use crate::params::bind_parameters;

/// One decoded SQLite value, keeping its storage class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Executes catalog or ad-hoc statements against a pool.
#[derive(Debug, Clone)]
pub struct QueryRunner {
    pool: SqlitePool,
}

impl QueryRunner {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run the statement registered under `label`, binding `user_id` to its
    /// placeholders when it has any.
    pub async fn run_labeled(
        &self,
        catalog: &QueryCatalog,
        label: &str,
        user_id: Option<i64>,
    ) -> Result<QueryOutput, QueryError> {
        let query = catalog
            .get(label)
            .ok_or_else(|| QueryError::UnknownLabel(label.to_string()))?;
        let params = bind_parameters(label, &query.sql, user_id)?;
        info!(label, params = params.len(), "running labeled query");
        self.execute(&query.sql, &params).await
    }

    /// Run ad-hoc SQL without parameters.
    pub async fn run_sql(&self, sql: &str) -> Result<QueryOutput, QueryError> {
        info!("running ad-hoc query");
        self.execute(sql, &[]).await
    }

    async fn execute(&self, sql: &str, params: &[i64]) -> Result<QueryOutput, QueryError> {
        let mut query = sqlx::query(sql);
        for value in params {
            query = query.bind(*value);
        }
        let rows = query.fetch_all(&self.pool).await?;

        let columns = match rows.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect(),
            None => {
                let describe = (&self.pool).describe(sql).await?;
                describe
                    .columns()
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect()
            }
        };

        let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), columns = ?columns, "query finished");
        Ok(QueryOutput { columns, rows })
    }
}

fn decode_row(row: &SqliteRow) -> Result<Vec<CellValue>, QueryError> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

fn decode_cell(row: &SqliteRow, index: usize) -> Result<CellValue, QueryError> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let storage = raw.type_info().name().to_ascii_uppercase();
    let value = match storage.as_str() {
        "INTEGER" | "BOOLEAN" => CellValue::Int(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" | "NUMERIC" => CellValue::Real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => CellValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        _ => CellValue::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}
