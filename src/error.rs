use thiserror::Error;

use crate::core::task::TaskId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Cycle(String),

    #[error("Task {task} depends on {dependency}, which is not in the batch")]
    UnresolvedDependency { task: TaskId, dependency: TaskId },
}

pub type Result<T> = std::result::Result<T, Error>;
