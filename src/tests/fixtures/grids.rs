// Shared grid fixtures for the schedule tests.
//
// Layout produced by `ScheduleGridBuilder`
// - Row 0 is the header: "Kod pracownika" followed by the day numbers 1..=31.
// - `employee` appends the mode, start and end rows of one block.
// - Column index equals the day of month.

use crate::modules::schedules::core::grid::Grid;
use crate::modules::schedules::core::roster::Roster;
use rstest::fixture;

const DAY_COLUMNS: usize = 32;

#[fixture]
pub fn roster() -> Roster {
    Roster::new(["AB", "CD", "EF"], ["Sala 1", "Sala 2"])
}

pub struct ScheduleGridBuilder {
    rows: Vec<Vec<String>>,
}

impl Default for ScheduleGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleGridBuilder {
    pub fn new() -> Self {
        let mut header = vec!["Kod pracownika".to_string()];
        header.extend((1..DAY_COLUMNS).map(|day| day.to_string()));
        Self { rows: vec![header] }
    }

    pub fn title(mut self, text: &str) -> Self {
        self.rows.insert(0, vec![text.to_string()]);
        self
    }

    pub fn room(mut self, name: &str, cells: &[(u32, &str)]) -> Self {
        self.rows.push(day_row(name, cells.iter().copied()));
        self
    }

    /// A row with a blank first column carrying day-based substitute codes.
    pub fn substitutes(mut self, cells: &[(u32, &str)]) -> Self {
        self.rows.push(day_row("", cells.iter().copied()));
        self
    }

    /// `(day, mode, start, end)` per worked day.
    pub fn employee(mut self, code: &str, days: &[(u32, &str, &str, &str)]) -> Self {
        self.rows.push(day_row(code, days.iter().map(|d| (d.0, d.1))));
        self.rows.push(day_row("", days.iter().map(|d| (d.0, d.2))));
        self.rows.push(day_row("", days.iter().map(|d| (d.0, d.3))));
        self
    }

    pub fn ok_row(self) -> Self {
        self.first_column("OK")
    }

    pub fn first_column(mut self, value: &str) -> Self {
        self.rows.push(vec![value.to_string()]);
        self
    }

    pub fn build(self) -> Grid {
        Grid::from_text_rows(self.rows)
    }
}

fn day_row<'a>(first: &str, cells: impl Iterator<Item = (u32, &'a str)>) -> Vec<String> {
    let mut row = vec![String::new(); DAY_COLUMNS];
    row[0] = first.to_string();
    for (day, value) in cells {
        row[day as usize] = value.to_string();
    }
    row
}
