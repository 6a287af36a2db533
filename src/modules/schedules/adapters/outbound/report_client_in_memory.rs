use crate::modules::schedules::adapters::outbound::report_client::ReportClient;
use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedReportRequest {
    pub entries: Vec<ScheduleEntry>,
    pub credential: String,
}

#[derive(Default)]
pub struct InMemoryReportClient {
    requests: RwLock<Vec<RecordedReportRequest>>,
    is_offline: bool,
}

impl InMemoryReportClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn requests(&self) -> Vec<RecordedReportRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl ReportClient for InMemoryReportClient {
    async fn create_reports(&self, entries: &[ScheduleEntry], credential: &str) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Report service offline"));
        }
        self.requests.write().await.push(RecordedReportRequest {
            entries: entries.to_vec(),
            credential: credential.to_string(),
        });
        Ok(())
    }
}
