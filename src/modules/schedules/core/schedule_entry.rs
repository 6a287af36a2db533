use crate::modules::schedules::core::period::Period;
use crate::modules::schedules::core::time::minutes_between;
use crate::modules::schedules::core::work_mode::WorkMode;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One normalized day of work for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub period: Period,
    pub day: u32,
    pub employee_code: String,
    pub substitute_code: Option<String>,
    pub room_symbol: Option<String>,
    pub work_mode: WorkMode,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
    pub processed: bool,
}

impl ScheduleEntry {
    /// Builds an unprocessed entry; the duration is derived from the two times.
    pub fn new(
        period: Period,
        day: u32,
        employee_code: impl Into<String>,
        work_mode: WorkMode,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            period,
            day,
            employee_code: employee_code.into(),
            substitute_code: None,
            room_symbol: None,
            work_mode,
            start_time,
            end_time,
            duration_minutes: minutes_between(start_time, end_time),
            processed: false,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.period.date(self.day)
    }

    /// The person actually on duty: the substitute when one is set.
    pub fn covering_employee(&self) -> &str {
        self.substitute_code.as_deref().unwrap_or(&self.employee_code)
    }
}
