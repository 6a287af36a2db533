// Late-shift synthesis.
//
// Purpose
// - Make sure full-day modes (F, B) are covered until the end of each day.
//
// Responsibilities
// - For every (mode, date) of the period, append one zero-length entry per covering
//   employee that starts one second after the latest recorded end and ends at 23:59:59.
// - Rerunning on its own output appends nothing.

use crate::modules::schedules::core::period::Period;
use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use crate::modules::schedules::core::time::add_one_second;
use crate::modules::schedules::core::work_mode::WorkMode;
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::{BTreeMap, BTreeSet};

pub const LATE_SHIFT_END: NaiveTime = NaiveTime::from_hms_opt(23, 59, 59).unwrap();

pub fn is_late_shift(entry: &ScheduleEntry) -> bool {
    entry.end_time == LATE_SHIFT_END && entry.duration_minutes == 0
}

#[derive(Default)]
struct Coverage<'a> {
    latest_end: Option<NaiveTime>,
    employees: BTreeSet<&'a str>,
}

/// Appends the missing late shifts for `period` and returns how many were added.
pub fn synthesize_late_shifts(entries: &mut Vec<ScheduleEntry>, period: Period) -> usize {
    let mut groups: BTreeMap<(WorkMode, NaiveDate), Coverage<'_>> = BTreeMap::new();
    for entry in entries.iter() {
        if entry.period != period
            || !WorkMode::LATE_SHIFT.contains(&entry.work_mode)
            || is_late_shift(entry)
        {
            continue;
        }
        let Some(date) = entry.date() else { continue };
        let coverage = groups.entry((entry.work_mode, date)).or_default();
        coverage.latest_end = coverage.latest_end.max(Some(entry.end_time));
        coverage.employees.insert(entry.covering_employee());
    }

    let mut late_shifts = Vec::new();
    for ((mode, date), coverage) in &groups {
        let Some(latest_end) = coverage.latest_end else { continue };
        let start = add_one_second(latest_end);
        for employee in &coverage.employees {
            let exists = entries.iter().any(|e| {
                e.work_mode == *mode
                    && e.covering_employee() == *employee
                    && e.date() == Some(*date)
                    && e.start_time == start
                    && e.end_time == LATE_SHIFT_END
            });
            if exists {
                continue;
            }
            let mut late = ScheduleEntry::new(period, date.day(), *employee, *mode, start, LATE_SHIFT_END);
            late.duration_minutes = 0;
            late_shifts.push(late);
        }
    }

    let added = late_shifts.len();
    entries.extend(late_shifts);
    added
}
