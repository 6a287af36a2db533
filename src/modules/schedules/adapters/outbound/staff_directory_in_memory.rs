use crate::modules::schedules::adapters::outbound::staff_directory::StaffDirectory;
use crate::modules::schedules::core::roster::Roster;
use async_trait::async_trait;

#[derive(Default)]
pub struct InMemoryStaffDirectory {
    roster: Roster,
    is_offline: bool,
}

impl InMemoryStaffDirectory {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            is_offline: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait]
impl StaffDirectory for InMemoryStaffDirectory {
    async fn roster(&self) -> anyhow::Result<Roster> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Staff directory offline"));
        }
        Ok(self.roster.clone())
    }
}
