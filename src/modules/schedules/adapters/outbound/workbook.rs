use crate::modules::schedules::core::grid::Grid;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("schedule file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("schedule file has no sheets: {}", .0.display())]
    NoSheets(PathBuf),

    #[error("cannot read schedule file {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// Source of schedule grids. Only the first sheet of a workbook is read.
#[async_trait]
pub trait WorkbookReader: Send + Sync {
    async fn open(&self, path: &Path) -> Result<Grid, WorkbookError>;
}
