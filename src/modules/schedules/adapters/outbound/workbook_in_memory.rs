use crate::modules::schedules::adapters::outbound::workbook::{WorkbookError, WorkbookReader};
use crate::modules::schedules::core::grid::Grid;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Grids keyed by path, for tests and local runs without spreadsheet files.
#[derive(Default)]
pub struct InMemoryWorkbookReader {
    sheets: RwLock<HashMap<PathBuf, Grid>>,
}

impl InMemoryWorkbookReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, path: impl Into<PathBuf>, grid: Grid) {
        self.sheets.write().await.insert(path.into(), grid);
    }
}

#[async_trait]
impl WorkbookReader for InMemoryWorkbookReader {
    async fn open(&self, path: &Path) -> Result<Grid, WorkbookError> {
        self.sheets
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| WorkbookError::NotFound(path.to_path_buf()))
    }
}
