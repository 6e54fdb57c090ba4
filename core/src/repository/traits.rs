use crate::error::Result;
use crate::model::task::{NewTask, Task};

pub trait TaskRepository {
    /// Persists `task` as `Pending` and returns it with its assigned id.
    fn insert(&self, task: NewTask) -> Result<Task>;
    fn get(&self, id: i64) -> Result<Option<Task>>;
    /// Pending tasks, highest priority first, then earliest due date.
    /// Tasks without a due date come after dated ones.
    fn list_pending(&self) -> Result<Vec<Task>>;
    fn list_all(&self) -> Result<Vec<Task>>;
    /// Returns the number of rows moved from `Pending` to `Completed`.
    fn mark_completed(&self, id: i64) -> Result<usize>;
}
