use std::path::PathBuf;

use crate::error::{Result, TaskError};

const DATA_DIR_NAME: &str = ".prioritask";
const DEFAULT_DB_NAME: &str = "tasks.db";

/// Where the task store lives.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

impl AppConfig {
    /// Uses `db_path` when given, otherwise `~/.prioritask/tasks.db`.
    pub fn resolve(db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(path) => path,
            None => default_db_path()?,
        };
        Ok(Self { db_path })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(TaskError::HomeDirUnavailable)?;
    Ok(home_dir.join(DATA_DIR_NAME).join(DEFAULT_DB_NAME))
}
