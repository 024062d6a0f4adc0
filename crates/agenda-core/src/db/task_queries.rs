//! Task CRUD operations and range queries.

use jiff::SignedDuration;
use log::{debug, warn};
use rusqlite::{params, OptionalExtension};

use super::{format_date, format_datetime, parse_datetime, Database};
use crate::{
    error::{AgendaError, DatabaseResultExt, Result},
    models::{Task, TaskKind, TaskStatus},
    params::NewTask,
    period::DateRange,
    store::TaskStore,
};

const TASK_COLUMNS: &str = "id, client_id, order_id, kind, title, description, start_at, end_at, status, is_process, service, time_spent_minutes";
const SELECT_TASK_SQL: &str = "SELECT id, client_id, order_id, kind, title, description, start_at, end_at, status, is_process, service, time_spent_minutes FROM tasks WHERE id = ?1";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (client_id, order_id, kind, title, description, start_at, end_at, status, is_process, service, time_spent_minutes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET client_id = ?1, order_id = ?2, kind = ?3, title = ?4, description = ?5, start_at = ?6, end_at = ?7, status = ?8, is_process = ?9, service = ?10, time_spent_minutes = ?11 WHERE id = ?12";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
// Date prefixes compare lexically; the precise end-exclusive check happens
// after decoding.
const RANGE_CONDITION: &str =
    "substr(start_at, 1, 10) <= ?2 AND substr(COALESCE(end_at, start_at), 1, 10) >= ?1";

/// Raw column values of one task row, before temporal decoding.
struct TaskRow {
    id: i64,
    client_id: Option<i64>,
    order_id: Option<i64>,
    kind: String,
    title: String,
    description: Option<String>,
    start_at: String,
    end_at: Option<String>,
    status: String,
    is_process: bool,
    service: Option<String>,
    time_spent_minutes: Option<i64>,
}

impl TaskRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            client_id: row.get(1)?,
            order_id: row.get(2)?,
            kind: row.get(3)?,
            title: row.get(4)?,
            description: row.get(5)?,
            start_at: row.get(6)?,
            end_at: row.get(7)?,
            status: row.get(8)?,
            is_process: row.get(9)?,
            service: row.get(10)?,
            time_spent_minutes: row.get(11)?,
        })
    }

    fn decode(self) -> Result<Task> {
        let record = format!("task {}", self.id);
        let start_at = parse_datetime(&record, "start_at", &self.start_at)?;
        let end_at = self
            .end_at
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_datetime(&record, "end_at", raw))
            .transpose()?;
        let status = self
            .status
            .parse::<TaskStatus>()
            .map_err(|e| AgendaError::invalid_data(&record, e))?;

        Ok(Task {
            id: self.id as u64,
            client_id: self.client_id.map(|id| id as u64),
            order_id: self.order_id.map(|id| id as u64),
            kind: TaskKind::from_label(&self.kind),
            title: self.title,
            description: self.description,
            start_at,
            end_at,
            status,
            is_process: self.is_process,
            service: self.service,
            time_spent: self.time_spent_minutes.map(SignedDuration::from_mins),
        })
    }
}

fn time_spent_minutes(time_spent: Option<SignedDuration>) -> Option<i64> {
    time_spent.map(|d| d.as_mins())
}

/// Decodes rows, logging and dropping those that fail.
fn decode_rows(rows: Vec<TaskRow>) -> Vec<Task> {
    rows.into_iter()
        .filter_map(|row| match row.decode() {
            Ok(task) => Some(task),
            Err(e) => {
                warn!("Skipping undecodable task: {e}");
                None
            }
        })
        .collect()
}

impl Database {
    fn select_tasks(&self, sql: &str, values: &[&dyn rusqlite::ToSql]) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare task query")?;
        let rows = stmt
            .query_map(values, TaskRow::from_row)
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task rows")?;
        Ok(decode_rows(rows))
    }
}

impl TaskStore for Database {
    fn query(&self, range: DateRange) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE {RANGE_CONDITION} ORDER BY start_at, id"
        );
        let start = format_date(range.start);
        let end = format_date(range.end);
        let mut tasks = self.select_tasks(&sql, &[&start, &end])?;
        tasks.retain(|task| task.days().intersect(&range).is_some());
        tasks.sort_by(|a, b| a.start_at.cmp(&b.start_at).then(a.id.cmp(&b.id)));
        debug!("Loaded {} tasks for {range}", tasks.len());
        Ok(tasks)
    }

    fn get(&self, id: u64) -> Result<Option<Task>> {
        let row = self
            .connection
            .query_row(SELECT_TASK_SQL, params![id as i64], TaskRow::from_row)
            .optional()
            .db_context("Failed to query task")?;
        row.map(TaskRow::decode).transpose()
    }

    fn insert(&mut self, task: &NewTask) -> Result<Task> {
        self.connection
            .execute(
                INSERT_TASK_SQL,
                params![
                    task.client_id.map(|id| id as i64),
                    task.order_id.map(|id| id as i64),
                    task.kind.as_str(),
                    task.title.trim(),
                    task.description.as_deref(),
                    format_datetime(task.start_at),
                    task.end_at.map(format_datetime),
                    TaskStatus::Pending.as_str(),
                    task.is_process,
                    task.service.as_deref(),
                    time_spent_minutes(task.time_spent),
                ],
            )
            .db_context("Failed to insert task")?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(Task {
            id,
            client_id: task.client_id,
            order_id: task.order_id,
            kind: task.kind.clone(),
            title: task.title.trim().to_string(),
            description: task.description.clone(),
            start_at: task.start_at,
            end_at: task.end_at,
            status: TaskStatus::Pending,
            is_process: task.is_process,
            service: task.service.clone(),
            time_spent: task.time_spent,
        })
    }

    fn save(&mut self, task: &Task) -> Result<()> {
        let updated = self
            .connection
            .execute(
                UPDATE_TASK_SQL,
                params![
                    task.client_id.map(|id| id as i64),
                    task.order_id.map(|id| id as i64),
                    task.kind.as_str(),
                    task.title,
                    task.description.as_deref(),
                    format_datetime(task.start_at),
                    task.end_at.map(format_datetime),
                    task.status.as_str(),
                    task.is_process,
                    task.service.as_deref(),
                    time_spent_minutes(task.time_spent),
                    task.id as i64,
                ],
            )
            .db_context("Failed to update task")?;

        if updated == 0 {
            return Err(AgendaError::TaskNotFound { id: task.id });
        }
        Ok(())
    }

    fn delete(&mut self, id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;
        Ok(deleted > 0)
    }
}
