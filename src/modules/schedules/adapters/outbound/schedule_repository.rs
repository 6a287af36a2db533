// Repository traits for schedule and statistics persistence.
//
// Purpose
// - ScheduleRepository: replace the unprocessed schedule of a period and read it back.
// - StatisticsRepository: drop unprocessed statistics before a period is re-imported.

use crate::modules::schedules::core::period::Period;
use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use async_trait::async_trait;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Returns the number of removed entries.
    async fn delete_unprocessed(&self, period: Period) -> anyhow::Result<usize>;
    async fn save_all(&self, entries: &[ScheduleEntry]) -> anyhow::Result<()>;
    async fn list_by_period(&self, period: Period) -> anyhow::Result<Vec<ScheduleEntry>>;
}

#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    async fn delete_unprocessed(&self, period: Period) -> anyhow::Result<usize>;
}
