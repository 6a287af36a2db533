// Workbook reader backed by calamine (xlsx, xlsm, xls, ods).
//
// Responsibilities
// - Read the first sheet into a `Grid`, keeping absolute cell coordinates.
// - Prefer the formula text over the cached value for formula cells.
// - Parse on the blocking pool.

use crate::modules::schedules::adapters::outbound::workbook::{WorkbookError, WorkbookReader};
use crate::modules::schedules::core::grid::{Cell, Grid};
use async_trait::async_trait;
use calamine::{Data, Reader, open_workbook_auto};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct CalamineWorkbookReader;

impl CalamineWorkbookReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WorkbookReader for CalamineWorkbookReader {
    async fn open(&self, path: &Path) -> Result<Grid, WorkbookError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(WorkbookError::NotFound(path.to_path_buf()));
        }
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_first_sheet(&owned))
            .await
            .map_err(|error| unreadable(path, error))?
    }
}

fn read_first_sheet(path: &Path) -> Result<Grid, WorkbookError> {
    let mut workbook = open_workbook_auto(path).map_err(|error| unreadable(path, error))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| WorkbookError::NoSheets(path.to_path_buf()))?;
    let values = workbook
        .worksheet_range(&sheet)
        .map_err(|error| unreadable(path, error))?;

    let mut grid = Grid::default();
    if let Some((top, left)) = values.start() {
        for (row, column, data) in values.cells() {
            let cell = to_cell(data);
            if cell != Cell::Blank {
                grid.set(top as usize + row, left as usize + column, cell);
            }
        }
    }

    match workbook.worksheet_formula(&sheet) {
        Ok(formulas) => {
            if let Some((top, left)) = formulas.start() {
                for (row, column, formula) in formulas.cells() {
                    if !formula.is_empty() {
                        grid.set(
                            top as usize + row,
                            left as usize + column,
                            Cell::Formula(formula.clone()),
                        );
                    }
                }
            }
        }
        Err(error) => tracing::debug!(%error, sheet = %sheet, "formulas unavailable, using cached values"),
    }

    Ok(grid)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Blank,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Float(value) => Cell::Number(*value),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => Cell::DateTime(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
        Data::Error(error) => Cell::Error(error.to_string()),
    }
}

fn unreadable(path: &Path, error: impl std::fmt::Display) -> WorkbookError {
    WorkbookError::Unreadable {
        path: PathBuf::from(path),
        reason: error.to_string(),
    }
}
