use crate::modules::schedules::core::roster::Roster;
use async_trait::async_trait;

/// Employees and rooms known to the staff records.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    async fn roster(&self) -> anyhow::Result<Roster>;
}
