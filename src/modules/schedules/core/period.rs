use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar year-month a schedule batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Finds the first `YYYY-MM` token in a file name, e.g. `grafik_2024-03_v2.xlsx`.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let bytes = file_name.as_bytes();
        if bytes.len() < 7 {
            return None;
        }
        (0..=bytes.len() - 7).find_map(|i| {
            let window = &bytes[i..i + 7];
            let digits_ok = window[..4].iter().all(u8::is_ascii_digit)
                && window[5..].iter().all(u8::is_ascii_digit);
            if !digits_ok || window[4] != b'-' {
                return None;
            }
            let year: i32 = file_name[i..i + 4].parse().ok()?;
            let month: u32 = file_name[i + 5..i + 7].parse().ok()?;
            Self::new(year, month)
        })
    }

    /// True iff `day` forms a real calendar date in this month.
    pub fn is_valid_day(&self, day: u32) -> bool {
        (1..=31).contains(&day) && self.date(day).is_some()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
