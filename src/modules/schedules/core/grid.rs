// In-memory view of the first sheet of a schedule workbook.
//
// Purpose
// - Give validation and extraction a typed grid that does not depend on any spreadsheet library.
//
// Responsibilities
// - Hold heterogeneous cells with 0-based (row, column) coordinates.
// - Read any cell as text without ever failing (`cell_text`).

use chrono::{Duration, NaiveDate};

/// Returned by the cell reader for cell kinds it cannot render.
pub const UNSUPPORTED_CELL: &str = "#UNSUPPORTED";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Blank,
    Text(String),
    Number(f64),
    /// Serial date-time in days since 1899-12-30; values below 1.0 are a time of day.
    DateTime(f64),
    Bool(bool),
    Formula(String),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Builds a grid of text cells; empty strings become blank cells.
    pub fn from_text_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| match value.as_ref() {
                        "" => Cell::Blank,
                        text => Cell::Text(text.to_string()),
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    /// Places a cell, growing the grid with blank cells as needed.
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, Cell::Blank);
        }
        cells[column] = cell;
    }

    pub fn text(&self, row: usize, column: usize) -> String {
        cell_text(self.cell(row, column))
    }

    pub fn upper(&self, row: usize, column: usize) -> String {
        self.text(row, column).to_uppercase()
    }

    pub fn is_blank(&self, row: usize, column: usize) -> bool {
        self.text(row, column).is_empty()
    }
}

/// Text of a cell as an author would read it on screen.
pub fn cell_text(cell: Option<&Cell>) -> String {
    match cell {
        None | Some(Cell::Blank) => String::new(),
        Some(Cell::Text(text)) => text.trim().to_string(),
        Some(Cell::Number(value)) => format_number(*value),
        Some(Cell::DateTime(serial)) => format_serial(*serial),
        Some(Cell::Bool(value)) => value.to_string(),
        Some(Cell::Formula(formula)) => formula.clone(),
        Some(Cell::Error(_)) => UNSUPPORTED_CELL.to_string(),
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn format_serial(serial: f64) -> String {
    if !serial.is_finite() || serial < 0.0 {
        return UNSUPPORTED_CELL.to_string();
    }
    let total_minutes = (serial * 24.0 * 60.0).round() as i64;
    let days = total_minutes / (24 * 60);
    let minutes_of_day = total_minutes % (24 * 60);
    let time = format!("{}:{:02}", minutes_of_day / 60, minutes_of_day % 60);
    if days == 0 {
        return time;
    }
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return UNSUPPORTED_CELL.to_string();
    };
    match epoch.checked_add_signed(Duration::days(days)) {
        Some(date) if minutes_of_day == 0 => date.format("%Y-%m-%d").to_string(),
        Some(date) => format!("{} {time}", date.format("%Y-%m-%d")),
        None => UNSUPPORTED_CELL.to_string(),
    }
}

/// A1-style reference for a 0-based coordinate, e.g. (4, 2) -> `C5`.
pub fn cell_ref(row: usize, column: usize) -> String {
    let mut letters = Vec::new();
    let mut n = column + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    let column: String = letters.into_iter().rev().collect();
    format!("{column}{}", row + 1)
}

#[cfg(test)]
mod grid_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "")]
    #[case(Some(Cell::Blank), "")]
    #[case(Some(Cell::Text("  ab ".into())), "ab")]
    #[case(Some(Cell::Number(7.0)), "7")]
    #[case(Some(Cell::Number(7.5)), "7.5")]
    #[case(Some(Cell::DateTime(0.3125)), "7:30")]
    #[case(Some(Cell::DateTime(45352.0)), "2024-03-01")]
    #[case(Some(Cell::Bool(true)), "true")]
    #[case(Some(Cell::Bool(false)), "false")]
    #[case(Some(Cell::Formula("SUM(B2:B4)".into())), "SUM(B2:B4)")]
    #[case(Some(Cell::Error("#DIV/0!".into())), UNSUPPORTED_CELL)]
    fn it_should_read_every_cell_kind_as_text(#[case] cell: Option<Cell>, #[case] expected: &str) {
        assert_eq!(cell_text(cell.as_ref()), expected);
    }

    #[rstest]
    fn it_should_grow_when_setting_a_cell_out_of_bounds() {
        let mut grid = Grid::default();
        grid.set(2, 3, Cell::Text("x".into()));
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.width(2), 4);
        assert_eq!(grid.text(2, 3), "x");
        assert!(grid.is_blank(2, 0));
        assert!(grid.is_blank(10, 10));
    }

    #[rstest]
    #[case(0, 0, "A1")]
    #[case(4, 2, "C5")]
    #[case(0, 25, "Z1")]
    #[case(9, 26, "AA10")]
    #[case(0, 31, "AF1")]
    fn it_should_render_a1_references(#[case] row: usize, #[case] column: usize, #[case] expected: &str) {
        assert_eq!(cell_ref(row, column), expected);
    }
}
