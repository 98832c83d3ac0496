//! Error types for the nx-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI one error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for nx-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<nx_project::ProjectError> for AppError {
    fn from(err: nx_project::ProjectError) -> Self {
        match err {
            nx_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<nx_project::ValidationError> for AppError {
    fn from(err: nx_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<nx_graph::GraphError> for AppError {
    fn from(err: nx_graph::GraphError) -> Self {
        match err {
            nx_graph::GraphError::MeshData(e) => AppError::Compile(e.to_string()),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
