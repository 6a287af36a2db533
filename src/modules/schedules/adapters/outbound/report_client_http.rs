use crate::modules::schedules::adapters::outbound::report_client::{ReportClient, ScheduleEntryMessage};
use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

pub struct HttpReportClient {
    client: Client,
    base_url: String,
}

impl HttpReportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/reports", self.base_url)
    }
}

#[async_trait]
impl ReportClient for HttpReportClient {
    async fn create_reports(&self, entries: &[ScheduleEntry], credential: &str) -> anyhow::Result<()> {
        let body: Vec<ScheduleEntryMessage> = entries.iter().map(ScheduleEntryMessage::from).collect();
        self.client
            .post(self.endpoint())
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .context("report service unreachable")?
            .error_for_status()
            .context("report service rejected the entries")?;
        tracing::info!(entries = body.len(), "reports requested");
        Ok(())
    }
}
