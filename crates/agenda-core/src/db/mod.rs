//! SQLite storage for tasks, clients and orders.
//!
//! [`Database`] implements the [`TaskStore`](crate::store::TaskStore) and
//! [`Directory`](crate::store::Directory) collaborators. Temporal columns are
//! civil text; a row whose task timestamps do not parse is a data error and is
//! skipped with a warning rather than failing the query.

use std::path::Path;

use jiff::civil::{Date, DateTime};
use rusqlite::Connection;

use crate::error::{AgendaError, DatabaseResultExt, Result};

pub mod directory_queries;
pub mod migrations;
pub mod task_queries;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

pub(crate) fn format_datetime(value: DateTime) -> String {
    value.strftime(DATETIME_FORMAT).to_string()
}

pub(crate) fn format_date(value: Date) -> String {
    value.to_string()
}

pub(crate) fn parse_datetime(record: &str, column: &str, raw: &str) -> Result<DateTime> {
    raw.trim()
        .parse::<DateTime>()
        .map_err(|e| AgendaError::invalid_data(record, format!("{column} '{raw}': {e}")))
}

/// Parses a stored date, treating blank or malformed text as unknown.
pub(crate) fn parse_date_lenient(raw: Option<&str>) -> Option<Date> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<Date>() {
        Ok(date) => Some(date),
        Err(_) => {
            // Some rows carry a full timestamp in a date column
            raw.parse::<DateTime>().ok().map(|dt| dt.date())
        }
    }
}
