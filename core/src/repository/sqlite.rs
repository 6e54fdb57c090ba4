use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::model::task::{NewTask, Status, Task};
use crate::repository::traits::TaskRepository;
use crate::time::{format_date, DATE_FORMAT};

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    due_date TEXT,
    priority INTEGER,
    status TEXT DEFAULT 'Pending'
)";
const INSERT_TASK: &str =
    "INSERT INTO tasks (description, due_date, priority, status) VALUES (?1, ?2, ?3, ?4)";
const SELECT_TASKS: &str = "SELECT id, description, due_date, priority, status FROM tasks";
const WHERE_ID: &str = "WHERE id = ?1";
// Empty strings are treated like NULL: older databases stored "" for "no due date".
const ORDER_PENDING: &str = "WHERE status = 'Pending'
    ORDER BY priority DESC,
             (due_date IS NULL OR due_date = '') ASC,
             due_date ASC,
             id ASC";
const ORDER_ALL: &str = "ORDER BY id ASC";
const COMPLETE_TASK: &str = "UPDATE tasks SET status = 'Completed' WHERE id = ?1 AND status = 'Pending'";

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// SQLite-backed task store. Owns a single connection for its whole lifetime.
#[derive(Debug)]
pub struct SqliteTaskRepository {
    conn: Connection,
}

impl SqliteTaskRepository {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?; // Ensure the directory exists
            }
        }
        let conn = Connection::open(path)?;
        tracing::info!("Opened task store: {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_TASKS)?;
        Ok(SqliteTaskRepository { conn })
    }

    /// Releases the connection, surfacing any error from closing it.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        tracing::debug!("Closed task store");
        Ok(())
    }

    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let tasks = stmt
            .query_map(params, read_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }
}

fn read_task_row(row: &Row) -> rusqlite::Result<Task> {
    let due_text: Option<String> = row.get(2)?;
    let due_date = match due_text.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?),
    };
    let priority: Option<i64> = row.get(3)?;
    let status: Option<Status> = row.get(4)?;

    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        due_date,
        priority: priority.unwrap_or(0).clamp(0, i64::from(u8::MAX)) as u8,
        status: status.unwrap_or_default(),
    })
}

impl TaskRepository for SqliteTaskRepository {
    fn insert(&self, task: NewTask) -> Result<Task> {
        let due_text = task.due_date.map(format_date);
        self.conn.execute(
            INSERT_TASK,
            params![task.description, due_text, task.priority, Status::Pending],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Inserted task {} with priority {}", id, task.priority);

        Ok(Task {
            id,
            description: task.description,
            due_date: task.due_date,
            priority: task.priority,
            status: Status::Pending,
        })
    }

    fn get(&self, id: i64) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id], read_task_row)
            .optional()?;
        Ok(task)
    }

    fn list_pending(&self) -> Result<Vec<Task>> {
        let tasks = self.query(&format!("{} {}", SELECT_TASKS, ORDER_PENDING), &[])?;
        tracing::debug!("Fetched {} pending tasks", tasks.len());
        Ok(tasks)
    }

    fn list_all(&self) -> Result<Vec<Task>> {
        self.query(&format!("{} {}", SELECT_TASKS, ORDER_ALL), &[])
    }

    fn mark_completed(&self, id: i64) -> Result<usize> {
        let affected = self.conn.execute(COMPLETE_TASK, params![id])?;
        if affected == 0 {
            tracing::warn!("No pending task with ID {} to complete", id);
        } else {
            tracing::debug!("Completed task {}", id);
        }
        Ok(affected)
    }
}
