use crate::modules::schedules::adapters::outbound::activity_assigner::ActivityAssigner;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct InMemoryActivityAssigner {
    calls: AtomicUsize,
    is_offline: bool,
}

impl InMemoryActivityAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivityAssigner for InMemoryActivityAssigner {
    async fn assign_activities(&self) -> anyhow::Result<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.is_offline {
            return Err(anyhow::anyhow!("Activity assigner offline"));
        }
        Ok(0)
    }
}
