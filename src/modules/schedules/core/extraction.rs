// Extraction of schedule entries from a validated grid.
//
// Purpose
// - Turn each employee block (mode, start and end rows, plus the row above it) into one
//   candidate entry per valid day.
//
// Responsibilities
// - Skip days silently when a time is missing or unreadable.
// - Resolve the work mode and the substitute for each day.
// - Poll the stop predicate once per employee block.

use crate::modules::schedules::core::grid::Grid;
use crate::modules::schedules::core::period::Period;
use crate::modules::schedules::core::roster::Roster;
use crate::modules::schedules::core::row_classifier::{room_symbol, rows_with_employees};
use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use crate::modules::schedules::core::time::parse_time;
use crate::modules::schedules::core::work_mode::WorkMode;

/// Raw cell values of one employee on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkScheduleRow<'a> {
    pub day: u32,
    pub day_substitute_code: Option<String>,
    pub raw_start: String,
    pub raw_end: String,
    pub raw_mode_info: String,
    pub roster: &'a Roster,
}

impl<'a> WorkScheduleRow<'a> {
    /// Reads day `day` of the block whose mode row is `employee_row`.
    pub fn read(grid: &Grid, roster: &'a Roster, employee_row: usize, day: u32) -> Self {
        let column = day as usize;
        let day_substitute_code = employee_row
            .checked_sub(1)
            .map(|above| grid.upper(above, column))
            .filter(|code| !code.is_empty() && roster.is_employee(code));
        Self {
            day,
            day_substitute_code,
            raw_start: grid.text(employee_row + 1, column),
            raw_end: grid.text(employee_row + 2, column),
            raw_mode_info: grid.upper(employee_row, column),
            roster,
        }
    }

    /// Work mode and substitute for this day. A day-based substitute overrides one
    /// inferred from the mode cell.
    pub fn resolve_mode(&self) -> (WorkMode, Option<String>) {
        let (mode, mut substitute) = match WorkMode::fixed(&self.raw_mode_info) {
            Some(mode) => (mode, None),
            None if self.roster.is_employee(&self.raw_mode_info) => {
                (WorkMode::S, Some(self.raw_mode_info.clone()))
            }
            None => (WorkMode::S, None),
        };
        if let Some(code) = &self.day_substitute_code {
            substitute = Some(code.clone());
        }
        (mode, substitute)
    }

    pub fn into_entry(
        self,
        period: Period,
        employee_code: &str,
        room: Option<&str>,
    ) -> Option<ScheduleEntry> {
        if self.raw_start.is_empty() || self.raw_end.is_empty() {
            return None;
        }
        let start = parse_time(&self.raw_start)?;
        let end = parse_time(&self.raw_end)?;
        let (mode, substitute) = self.resolve_mode();

        let mut entry = ScheduleEntry::new(period, self.day, employee_code, mode, start, end);
        entry.substitute_code = substitute;
        entry.room_symbol = room.map(str::to_string);
        Some(entry)
    }
}

/// Extracts every readable entry. Stops before the next block once `should_stop` returns true.
pub fn extract_entries(
    grid: &Grid,
    roster: &Roster,
    period: Period,
    should_stop: impl Fn() -> bool,
) -> Vec<ScheduleEntry> {
    let mut entries = Vec::new();
    for employee_row in rows_with_employees(grid, roster) {
        if should_stop() {
            tracing::debug!(employee_row, "extraction interrupted");
            break;
        }
        let employee_code = grid.upper(employee_row, 0);
        let room = room_symbol(grid, employee_row);
        entries.extend(
            (1..=31)
                .filter(|&day| period.is_valid_day(day))
                .filter_map(|day| {
                    WorkScheduleRow::read(grid, roster, employee_row, day).into_entry(
                        period,
                        &employee_code,
                        room.as_deref(),
                    )
                }),
        );
    }
    entries
}
