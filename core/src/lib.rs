pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::AppConfig;
pub use error::{Result, TaskError};
pub use model::task::{NewTask, Priority, Status, Task, MAX_PRIORITY};
pub use repository::{SqliteTaskRepository, TaskRepository};
pub use service::dto::PriorityBar;
pub use service::scoring::score;
pub use service::task_service::{max_priority, Completion, TaskService};
pub use time::{parse_due_date, today};
