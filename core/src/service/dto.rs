use serde::{Deserialize, Serialize};

use crate::model::task::{Priority, Task};

/// One bar of the priority chart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriorityBar {
    pub id: i64,
    pub label: String,
    pub priority: Priority,
}

impl PriorityBar {
    pub fn from_entity(task: Task) -> Self {
        Self {
            id: task.id,
            label: task.description,
            priority: task.priority,
        }
    }
}
