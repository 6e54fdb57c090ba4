use std::io::Write;

use anyhow::Result;
use prioritask_core::{time::format_date, Task};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            priority: task.priority,
            due: due_text(task),
            status: task.status.to_string(),
            description: task.description.clone(),
        }
    }
}

fn due_text(task: &Task) -> String {
    task.due_date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// One-line summary used by the interactive menu.
pub fn task_line(task: &Task) -> String {
    format!(
        "ID: {}, Description: {}, Due Date: {}, Priority: {}, Status: {}",
        task.id,
        task.description,
        due_text(task),
        task.priority,
        task.status
    )
}

pub fn write_table<W: Write>(out: &mut W, tasks: &[Task]) -> Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks found.")?;
        return Ok(());
    }
    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    writeln!(out, "{}", table)?;
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, tasks: &[Task]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, tasks)?;
    writeln!(out)?;
    Ok(())
}
