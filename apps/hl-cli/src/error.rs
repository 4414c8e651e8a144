//! Error type for the command-line application.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(#[from] hl_project::ProjectError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] hl_sim::SimError),

    #[error("Refusing to overwrite existing file: {}", path.display())]
    Exists { path: PathBuf },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
