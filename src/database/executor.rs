/*!
 * Single-statement query execution.
 *
 * `QueryExecutor::execute` is the only path through which the rest of the
 * crate touches the database. Each call opens one transaction, runs one
 * statement with positional parameters, commits, and hands back a fully
 * materialized `RowSet`.
 */

use log::trace;
use rusqlite::types::{FromSql, Value, ValueRef};
use rusqlite::{params_from_iter, Connection};
use std::sync::Arc;

use super::connection::DatabaseConnection;
use crate::errors::QueryError;

/// Result of a single statement
#[derive(Debug, Clone)]
pub struct RowSet {
    /// Row id assigned by an INSERT, if one happened
    pub insert_id: Option<i64>,
    /// Rows changed by an INSERT, UPDATE or DELETE; zero otherwise
    pub rows_affected: usize,
    columns: Arc<[String]>,
    rows: Vec<SqlRow>,
}

impl RowSet {
    /// Column names of the result, in statement order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows returned
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at the given position
    pub fn item(&self, index: usize) -> Option<&SqlRow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SqlRow> {
        self.rows.iter()
    }
}

impl IntoIterator for RowSet {
    type Item = SqlRow;
    type IntoIter = std::vec::IntoIter<SqlRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a SqlRow;
    type IntoIter = std::slice::Iter<'a, SqlRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// One materialized result row with by-name accessors
#[derive(Debug, Clone)]
pub struct SqlRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl SqlRow {
    /// Read a column by name, converting it to `T`
    pub fn get<T: FromSql>(&self, column: &str) -> Result<T, QueryError> {
        let index = self
            .columns
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| QueryError::Column {
                column: column.to_string(),
                reason: "no such column".to_string(),
            })?;

        self.convert(index, column)
    }

    /// Read a column by position, converting it to `T`
    pub fn get_index<T: FromSql>(&self, index: usize) -> Result<T, QueryError> {
        let name = self
            .columns
            .get(index)
            .ok_or_else(|| QueryError::Column {
                column: index.to_string(),
                reason: "index out of range".to_string(),
            })?;

        self.convert(index, name)
    }

    fn convert<T: FromSql>(&self, index: usize, column: &str) -> Result<T, QueryError> {
        T::column_result(ValueRef::from(&self.values[index])).map_err(|e| QueryError::Column {
            column: column.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Executes statements one transaction at a time
#[derive(Clone, Debug)]
pub struct QueryExecutor {
    db: DatabaseConnection,
}

impl QueryExecutor {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying store handle
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Run one statement inside its own transaction
    ///
    /// Reads commit an empty transaction; writes are durable once this
    /// returns `Ok`. On failure the transaction is rolled back.
    pub async fn execute(&self, statement: &str, params: Vec<Value>) -> Result<RowSet, QueryError> {
        let statement = statement.to_string();

        self.db
            .with_connection(move |conn| {
                let tx = conn
                    .transaction()
                    .map_err(|e| QueryError::engine(&statement, e))?;

                let row_set = run_statement(&tx, &statement, &params)?;

                tx.commit().map_err(|e| QueryError::engine(&statement, e))?;
                Ok(row_set)
            })
            .await
    }
}

fn run_statement(conn: &Connection, statement: &str, params: &[Value]) -> Result<RowSet, QueryError> {
    trace!("Executing: {}", statement.trim());

    let mut stmt = conn
        .prepare(statement)
        .map_err(|e| QueryError::engine(statement, e))?;

    let columns: Arc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    if columns.is_empty() {
        let changes = stmt
            .execute(params_from_iter(params.iter()))
            .map_err(|e| QueryError::engine(statement, e))?;

        let kind = StatementKind::of(statement);
        // sqlite3_changes is not reset by DDL, so only trust it for DML
        let rows_affected = if kind.is_dml() { changes } else { 0 };
        let insert_id = (kind == StatementKind::Insert && rows_affected > 0)
            .then(|| conn.last_insert_rowid());

        return Ok(RowSet {
            insert_id,
            rows_affected,
            columns,
            rows: Vec::new(),
        });
    }

    let mut rows = stmt
        .query(params_from_iter(params.iter()))
        .map_err(|e| QueryError::engine(statement, e))?;

    let mut collected = Vec::new();
    while let Some(row) = rows.next().map_err(|e| QueryError::engine(statement, e))? {
        let values = (0..columns.len())
            .map(|i| row.get::<_, Value>(i))
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| QueryError::engine(statement, e))?;

        collected.push(SqlRow {
            columns: columns.clone(),
            values,
        });
    }

    Ok(RowSet {
        insert_id: None,
        rows_affected: 0,
        columns,
        rows: collected,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Insert,
    Update,
    Delete,
    Other,
}

impl StatementKind {
    fn of(statement: &str) -> Self {
        let keyword = statement
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();

        match keyword.as_str() {
            "INSERT" | "REPLACE" => Self::Insert,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            _ => Self::Other,
        }
    }

    fn is_dml(self) -> bool {
        self != Self::Other
    }
}
