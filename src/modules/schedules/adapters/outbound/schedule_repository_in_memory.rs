// In memory schedule and statistics repositories.
//
// Purpose
// - Exercise the import flow without a database.
//
// Responsibilities
// - Keep schedule entries and statistics records in insertion order.
// - Optionally slow down `save_all` so tests can overlap imports.

use crate::modules::schedules::adapters::outbound::schedule_repository::{
    ScheduleRepository, StatisticsRepository,
};
use crate::modules::schedules::core::period::Period;
use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsRecord {
    pub employee_code: String,
    pub period: Period,
    pub processed: bool,
}

#[derive(Default)]
pub struct InMemorySchedules {
    entries: RwLock<Vec<ScheduleEntry>>,
    statistics: RwLock<Vec<StatisticsRecord>>,
    delay_save_ms: AtomicU64,
    is_offline: bool,
}

impl InMemorySchedules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn set_delay_save_ms(&self, ms: u64) {
        self.delay_save_ms.store(ms, Ordering::SeqCst);
    }

    pub async fn seed(&self, entries: Vec<ScheduleEntry>) {
        self.entries.write().await.extend(entries);
    }

    pub async fn seed_statistics(&self, records: Vec<StatisticsRecord>) {
        self.statistics.write().await.extend(records);
    }

    pub async fn all(&self) -> Vec<ScheduleEntry> {
        self.entries.read().await.clone()
    }

    pub async fn all_statistics(&self) -> Vec<StatisticsRecord> {
        self.statistics.read().await.clone()
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Schedule repository offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for InMemorySchedules {
    async fn delete_unprocessed(&self, period: Period) -> anyhow::Result<usize> {
        self.ensure_online()?;
        let mut guard = self.entries.write().await;
        let before = guard.len();
        guard.retain(|e| e.processed || e.period != period);
        Ok(before - guard.len())
    }

    async fn save_all(&self, entries: &[ScheduleEntry]) -> anyhow::Result<()> {
        self.ensure_online()?;
        let delay = self.delay_save_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.entries.write().await.extend_from_slice(entries);
        Ok(())
    }

    async fn list_by_period(&self, period: Period) -> anyhow::Result<Vec<ScheduleEntry>> {
        self.ensure_online()?;
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.period == period)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StatisticsRepository for InMemorySchedules {
    async fn delete_unprocessed(&self, period: Period) -> anyhow::Result<usize> {
        self.ensure_online()?;
        let mut guard = self.statistics.write().await;
        let before = guard.len();
        guard.retain(|s| s.processed || s.period != period);
        Ok(before - guard.len())
    }
}
