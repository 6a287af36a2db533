// Client port for the report-creation service.
//
// Purpose
// - Hand persisted schedule entries to the downstream service that builds reports from them.
//
// Responsibilities
// - Map entries to the camelCase transport schema.
// - Forward the caller's bearer credential unchanged.

use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryMessage {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub employee_code: String,
    pub substitute_code: Option<String>,
    pub room_symbol: Option<String>,
    pub work_mode: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
}

impl From<&ScheduleEntry> for ScheduleEntryMessage {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date(),
            employee_code: entry.employee_code.clone(),
            substitute_code: entry.substitute_code.clone(),
            room_symbol: entry.room_symbol.clone(),
            work_mode: entry.work_mode.to_string(),
            start_time: entry.start_time.format("%H:%M:%S").to_string(),
            end_time: entry.end_time.format("%H:%M:%S").to_string(),
            duration_minutes: entry.duration_minutes,
        }
    }
}

#[async_trait]
pub trait ReportClient: Send + Sync {
    async fn create_reports(&self, entries: &[ScheduleEntry], credential: &str) -> anyhow::Result<()>;
}
