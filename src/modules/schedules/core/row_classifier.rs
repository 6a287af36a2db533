use crate::modules::schedules::core::grid::Grid;
use crate::modules::schedules::core::roster::Roster;

/// Column-0 label that marks the first data row of a schedule sheet.
pub const HEADER_LABEL: &str = "Kod pracownika";

/// Column-0 marker for rows that carry no room.
pub const OK_MARKER: &str = "OK";

pub fn is_header(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(HEADER_LABEL)
}

pub fn header_row(grid: &Grid) -> Option<usize> {
    (0..grid.row_count()).find(|&row| is_header(&grid.text(row, 0)))
}

/// Rows below the header. Nothing when there is no header.
fn data_rows(grid: &Grid) -> std::ops::Range<usize> {
    let first = header_row(grid).map_or(grid.row_count(), |header| header + 1);
    first..grid.row_count()
}

/// Mode rows of every employee block, top to bottom.
pub fn rows_with_employees(grid: &Grid, roster: &Roster) -> Vec<usize> {
    data_rows(grid)
        .filter(|&row| {
            let code = grid.upper(row, 0);
            !code.is_empty() && roster.is_employee(&code)
        })
        .collect()
}

pub fn rows_with_rooms(grid: &Grid, roster: &Roster) -> Vec<usize> {
    data_rows(grid)
        .filter(|&row| {
            let name = grid.text(row, 0);
            !name.is_empty() && roster.is_room(&name)
        })
        .collect()
}

/// Last row whose first column holds anything.
pub fn last_populated_row(grid: &Grid) -> Option<usize> {
    (0..grid.row_count()).rev().find(|&row| !grid.is_blank(row, 0))
}

/// Room symbol for the employee block starting at `employee_row`, read from the row above.
pub fn room_symbol(grid: &Grid, employee_row: usize) -> Option<String> {
    let above = employee_row.checked_sub(1)?;
    let value = grid.text(above, 0);
    if value.is_empty() || value.eq_ignore_ascii_case(OK_MARKER) || is_header(&value) {
        return None;
    }
    Some(value)
}
