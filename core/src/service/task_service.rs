use chrono::NaiveDate;

use crate::error::{Result, TaskError};
use crate::model::task::{NewTask, Priority, Task};
use crate::repository::TaskRepository;
use crate::service::dto::PriorityBar;
use crate::service::scoring::score;
use crate::time::{parse_optional_due_date, today};

/// Result of asking for a task to be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Completed,
    /// No pending task had that id. Nothing was changed.
    Unchanged,
}

pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    pub fn create_task(&self, description: &str, due_date: Option<&str>) -> Result<Task> {
        self.create_task_on(description, due_date, today())
    }

    /// Validates, scores against `today` and persists a new task.
    pub fn create_task_on(
        &self,
        description: &str,
        due_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<Task> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::Validation("Task description is required.".to_string()));
        }
        let due_date = parse_optional_due_date(due_date)?;

        let priority = score(description, due_date, today);
        self.repo
            .insert(NewTask::new(description.to_string(), due_date, priority))
    }

    pub fn pending_tasks(&self) -> Result<Vec<Task>> {
        self.repo.list_pending()
    }

    pub fn all_tasks(&self) -> Result<Vec<Task>> {
        self.repo.list_all()
    }

    pub fn get_task(&self, id: i64) -> Result<Task> {
        self.repo.get(id)?.ok_or(TaskError::NotFound(id))
    }

    pub fn complete_task(&self, id: i64) -> Result<Completion> {
        match self.repo.mark_completed(id)? {
            0 => Ok(Completion::Unchanged),
            _ => Ok(Completion::Completed),
        }
    }

    pub fn priority_chart(&self) -> Result<Vec<PriorityBar>> {
        let bars = self
            .repo
            .list_pending()?
            .into_iter()
            .map(PriorityBar::from_entity)
            .collect();
        Ok(bars)
    }
}

/// Largest priority in `bars`, or zero when empty.
pub fn max_priority(bars: &[PriorityBar]) -> Priority {
    bars.iter().map(|b| b.priority).max().unwrap_or(0)
}
