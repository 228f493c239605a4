//! Statement execution.
//!
//! Runs caller-supplied SQL against the pool with positional bind
//! parameters. Results are fetched by streaming one row past the configured
//! cap so truncation can be reported without pulling an unbounded result
//! set into memory. An optional per-statement timeout can be enabled from
//! configuration; by default a statement runs until the database finishes
//! it.
//!
//! Statements without parameters go through the unprepared path, which also
//! lets the trusted execute endpoint run SQL that cannot be prepared.

use crate::error::{GatewayError, GatewayResult};
use crate::db::rows::RowToJson;
use crate::models::{QueryParam, QueryResult, RawOutcome};
use futures_util::StreamExt;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Either, PgPool};
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Executor with the configured statement timeout and result cap.
pub struct QueryExecutor {
    statement_timeout: Option<Duration>,
    max_rows: usize,
}

impl QueryExecutor {
    /// Create an executor. `statement_timeout` of `None` means unbounded.
    pub fn new(statement_timeout: Option<Duration>, max_rows: u32) -> Self {
        Self {
            statement_timeout,
            max_rows: max_rows as usize,
        }
    }

    /// Execute a statement and collect its rows.
    pub async fn fetch(
        &self,
        pool: &PgPool,
        sql: &str,
        params: &[QueryParam],
    ) -> GatewayResult<QueryResult> {
        let start = Instant::now();
        let fetch_limit = self.max_rows + 1;

        tracing::debug!(
            sql = %sql,
            params = params.len(),
            limit = self.max_rows,
            "Executing query"
        );

        let rows_future = if params.is_empty() {
            use sqlx::Executor;
            pool.fetch(sql).take(fetch_limit).collect::<Vec<_>>()
        } else {
            let mut query = sqlx::query(sql);
            for param in params {
                query = bind_param(query, param);
            }
            query.fetch(pool).take(fetch_limit).collect::<Vec<_>>()
        };

        let results = match self.statement_timeout {
            Some(t) => timeout(t, rows_future)
                .await
                .map_err(|_| timeout_error(t))?,
            None => rows_future.await,
        };

        let rows = collect_rows(results)?;
        Ok(self.process_rows(rows, start))
    }

    /// Execute a statement verbatim, collecting rows (if it returns any) and
    /// the affected-row count.
    pub async fn execute_raw(
        &self,
        pool: &PgPool,
        sql: &str,
        params: &[QueryParam],
    ) -> GatewayResult<RawOutcome> {
        let start = Instant::now();
        let fetch_limit = self.max_rows + 1;

        tracing::debug!(sql = %sql, params = params.len(), "Executing statement");

        let collect = async {
            let mut stream = if params.is_empty() {
                use sqlx::Executor;
                pool.fetch_many(sql)
            } else {
                let mut query = sqlx::query(sql);
                for param in params {
                    query = bind_param(query, param);
                }
                query.fetch_many(pool)
            };

            let mut rows: Vec<PgRow> = Vec::new();
            let mut rows_affected = 0u64;
            while let Some(item) = stream.next().await {
                match item? {
                    Either::Left(done) => rows_affected += done.rows_affected(),
                    Either::Right(row) => {
                        if rows.len() < fetch_limit {
                            rows.push(row);
                        }
                    }
                }
            }
            Ok::<_, sqlx::Error>((rows, rows_affected))
        };

        let (rows, rows_affected) = match self.statement_timeout {
            Some(t) => timeout(t, collect).await.map_err(|_| timeout_error(t))??,
            None => collect.await?,
        };

        let result = self.process_rows(rows, start);
        Ok(RawOutcome {
            columns: result.columns,
            rows: result.rows,
            rows_affected,
            truncated: result.truncated,
            execution_time_ms: result.execution_time_ms,
        })
    }

    fn process_rows(&self, rows: Vec<PgRow>, start: Instant) -> QueryResult {
        let execution_time_ms = start.elapsed().as_millis() as u64;

        if rows.is_empty() {
            return QueryResult {
                columns: Vec::new(),
                rows: Vec::new(),
                truncated: false,
                execution_time_ms,
            };
        }

        let columns = rows[0].column_metadata();
        let truncated = rows.len() > self.max_rows;
        let json_rows = rows
            .iter()
            .take(self.max_rows)
            .map(|r| r.to_json_map())
            .collect();

        if truncated {
            tracing::warn!(limit = self.max_rows, "Query result truncated");
        }

        QueryResult {
            columns,
            rows: json_rows,
            truncated,
            execution_time_ms,
        }
    }
}

fn collect_rows(results: Vec<Result<PgRow, sqlx::Error>>) -> GatewayResult<Vec<PgRow>> {
    let mut rows = Vec::with_capacity(results.len());
    for result in results {
        rows.push(result.map_err(GatewayError::from)?);
    }
    Ok(rows)
}

fn timeout_error(limit: Duration) -> GatewayError {
    GatewayError::query_execution(
        "Query failed",
        format!("statement exceeded {}s", limit.as_secs()),
        None,
    )
}

fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    param: &'q QueryParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match param {
        QueryParam::Null => query.bind(None::<String>),
        QueryParam::Bool(v) => query.bind(*v),
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::String(v) => query.bind(v.as_str()),
        QueryParam::Json(v) => query.bind(sqlx::types::Json(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_unbounded_by_default() {
        let executor = QueryExecutor::new(None, 10000);
        assert!(executor.statement_timeout.is_none());
        assert_eq!(executor.max_rows, 10000);
    }

    #[test]
    fn test_executor_with_timeout() {
        let executor = QueryExecutor::new(Some(Duration::from_secs(30)), 500);
        assert_eq!(executor.statement_timeout, Some(Duration::from_secs(30)));
        assert_eq!(executor.max_rows, 500);
    }

    #[test]
    fn test_timeout_error_is_execution_error() {
        let err = timeout_error(Duration::from_secs(30));
        assert!(matches!(err, GatewayError::QueryExecution { .. }));
        assert!(err.to_string().contains("30s"));
    }
}
