use crate::modules::schedules::adapters::outbound::workbook::WorkbookError;
use crate::modules::schedules::core::validation::{ValidationError, ValidationFailure, render};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("another schedule import is already in progress")]
    Busy,

    #[error("{}", ValidationFailure::MissingHeader)]
    StructuralValidation,

    #[error("{}", render(.0))]
    ContentValidation(Vec<ValidationError>),

    #[error("schedule file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("no YYYY-MM period in file name {0:?}")]
    MissingPeriod(String),

    #[error("schedule import cancelled")]
    Cancelled,

    #[error(transparent)]
    Processing(#[from] anyhow::Error),
}

impl From<ValidationFailure> for ImportError {
    fn from(failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::MissingHeader => ImportError::StructuralValidation,
            ValidationFailure::Content(errors) => ImportError::ContentValidation(errors),
        }
    }
}

impl From<WorkbookError> for ImportError {
    fn from(error: WorkbookError) -> Self {
        match error {
            WorkbookError::NotFound(path) => ImportError::FileNotFound(path),
            other => ImportError::Processing(other.into()),
        }
    }
}
