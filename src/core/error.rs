use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GavelError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Invalid schema document: {0}")]
    InvalidSchema(String),
    #[error("Path error: {0}")]
    PathError(String),
    #[error("Failed to write report: {0}")]
    ReportWriteError(String),
}

impl GavelError {
    /// Process exit code the CLI maps each failure class to.
    ///
    /// Validation *results* are not errors; a failed validation exits 1 from
    /// the dispatch layer. These codes cover I/O-level faults only.
    pub fn exit_code(&self) -> i32 {
        match self {
            GavelError::NotFound(_) => 2,
            GavelError::JsonError(_) => 3,
            GavelError::IoError(_) | GavelError::PathError(_) | GavelError::InvalidSchema(_) => 4,
            GavelError::ReportWriteError(_) => 5,
        }
    }
}
