use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Priority score. Always within `0..=MAX_PRIORITY`.
pub type Priority = u8;

pub const MAX_PRIORITY: Priority = 5;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Completed,
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Status::Pending),
            "Completed" => Ok(Status::Completed),
            other => Err(TaskError::Validation(format!("Unknown task status: '{}'", other))),
        }
    }
}

/// A stored task. Everything except `status` is fixed at creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }
}

/// A validated task that has not been persisted yet.
///
/// The repository assigns the id and the initial status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl NewTask {
    pub fn new(description: String, due_date: Option<NaiveDate>, priority: Priority) -> Self {
        Self {
            description,
            due_date,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        assert_eq!("Pending".parse::<Status>().unwrap(), Status::Pending);
        assert_eq!("Completed".parse::<Status>().unwrap(), Status::Completed);
        assert_eq!(Status::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_status_rejects_unknown_text() {
        assert!("Deleted".parse::<Status>().is_err());
        assert!("pending".parse::<Status>().is_err());
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(Status::default(), Status::Pending);
    }
}
