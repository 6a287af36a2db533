// Downstream notification after a successful import.
//
// Purpose
// - Trigger activity assignment and report creation for the entries just persisted.
//
// Responsibilities
// - Run detached from the import; the caller never awaits it.
// - Log failures instead of reporting them back to the import.

use crate::modules::schedules::adapters::outbound::activity_assigner::ActivityAssigner;
use crate::modules::schedules::adapters::outbound::report_client::ReportClient;
use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

#[derive(Clone)]
pub struct DownstreamNotifier {
    assigner: Arc<dyn ActivityAssigner>,
    report_client: Arc<dyn ReportClient>,
}

impl DownstreamNotifier {
    pub fn new(assigner: Arc<dyn ActivityAssigner>, report_client: Arc<dyn ReportClient>) -> Self {
        Self {
            assigner,
            report_client,
        }
    }

    pub fn notify(&self, entries: Vec<ScheduleEntry>, credential: String) -> JoinHandle<()> {
        let notifier = self.clone();
        tokio::spawn(
            async move {
                if let Err(error) = notifier.run(&entries, &credential).await {
                    tracing::warn!(error = %format!("{error:#}"), "downstream notification failed");
                }
            }
            .instrument(tracing::Span::current()),
        )
    }

    async fn run(&self, entries: &[ScheduleEntry], credential: &str) -> anyhow::Result<()> {
        let assigned = self
            .assigner
            .assign_activities()
            .await
            .context("activity assignment failed")?;
        tracing::debug!(assigned, "activities assigned");
        self.report_client
            .create_reports(entries, credential)
            .await
            .context("report creation failed")?;
        Ok(())
    }
}
