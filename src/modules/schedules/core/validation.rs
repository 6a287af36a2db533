// Whole-sheet validation of a schedule grid.
//
// Purpose
// - Reject sheets whose structure or content cannot be imported, before anything is extracted.
//
// Responsibilities
// - A missing header aborts immediately; nothing else can be checked without it.
// - Every other violation is collected. The scan always runs to the end and fails once,
//   listing the violations in the order they were found.
// - Never perform input or output.

use crate::modules::schedules::core::grid::{Grid, cell_ref};
use crate::modules::schedules::core::roster::Roster;
use crate::modules::schedules::core::row_classifier::{
    OK_MARKER, header_row, rows_with_employees, rows_with_rooms,
};
use crate::modules::schedules::core::work_mode::WorkMode;
use std::fmt;

/// A violation bound to a row, or to a single cell when `column` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub row: usize,
    pub column: Option<usize>,
    pub message: String,
}

impl ValidationError {
    pub fn row(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            column: None,
            message: message.into(),
        }
    }

    pub fn cell(row: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            column: Some(column),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}: {}", cell_ref(self.row, column), self.message),
            None => write!(f, "Row {}: {}", self.row + 1, self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("header row \"Kod pracownika\" not found in the first column")]
    MissingHeader,

    #[error("{}", render(.0))]
    Content(Vec<ValidationError>),
}

/// One line per violation, in encounter order.
pub fn render(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("{e}\n")).collect()
}

pub fn validate(grid: &Grid, roster: &Roster) -> Result<(), ValidationFailure> {
    let header = header_row(grid).ok_or(ValidationFailure::MissingHeader)?;
    let mut errors = Vec::new();

    check_first_column(grid, roster, header, &mut errors);
    check_employee_rows(grid, roster, header, &mut errors);
    check_room_rows(grid, roster, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(violations = errors.len(), "schedule sheet rejected");
        Err(ValidationFailure::Content(errors))
    }
}

fn check_first_column(grid: &Grid, roster: &Roster, header: usize, errors: &mut Vec<ValidationError>) {
    for row in header + 1..grid.row_count() {
        let value = grid.text(row, 0);
        if value.is_empty()
            || value.eq_ignore_ascii_case(OK_MARKER)
            || roster.is_employee(&value)
            || roster.is_room(&value)
        {
            continue;
        }
        errors.push(ValidationError::row(
            row,
            format!("\"{value}\" is not an employee code, a room name or {OK_MARKER}"),
        ));
    }
}

fn check_employee_rows(grid: &Grid, roster: &Roster, header: usize, errors: &mut Vec<ValidationError>) {
    let rows = rows_with_employees(grid, roster);
    if rows.is_empty() {
        errors.push(ValidationError::row(header, "no employee rows found"));
        return;
    }
    for row in rows {
        for column in 1..grid.width(row) {
            let value = grid.upper(row, column);
            if value.is_empty() || roster.is_employee(&value) || WorkMode::fixed(&value).is_some() {
                continue;
            }
            errors.push(ValidationError::cell(
                row,
                column,
                format!("\"{value}\" is neither an employee code nor one of F, B, U, UW, ZL"),
            ));
        }
    }
}

fn check_room_rows(grid: &Grid, roster: &Roster, errors: &mut Vec<ValidationError>) {
    for row in rows_with_rooms(grid, roster) {
        for column in 1..grid.width(row) {
            let value = grid.text(row, column);
            if value.is_empty() || roster.is_employee(&value) {
                continue;
            }
            errors.push(ValidationError::cell(
                row,
                column,
                format!("\"{value}\" in a room row is not an employee code"),
            ));
        }
    }
}
