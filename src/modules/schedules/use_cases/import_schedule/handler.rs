// Import orchestrator.
//
// Purpose
// - Run one schedule import from spreadsheet to persisted entries.
//
// Responsibilities
// - Hold the single-flight session for the whole run and honour cancellation at the
//   block checkpoints and right before persistence.
// - Replace the unprocessed schedule and statistics of the period, never processed ones.
// - Hand the persisted entries to the downstream notifier without waiting for it.
// - Leave exactly one report beside the source file: success or failure.

use crate::modules::schedules::adapters::outbound::schedule_repository::{
    ScheduleRepository, StatisticsRepository,
};
use crate::modules::schedules::adapters::outbound::staff_directory::StaffDirectory;
use crate::modules::schedules::adapters::outbound::workbook::WorkbookReader;
use crate::modules::schedules::core::extraction::extract_entries;
use crate::modules::schedules::core::late_shift::synthesize_late_shifts;
use crate::modules::schedules::core::period::Period;
use crate::modules::schedules::core::validation::validate;
use crate::modules::schedules::use_cases::import_schedule::command::ImportSchedule;
use crate::modules::schedules::use_cases::import_schedule::errors::ImportError;
use crate::modules::schedules::use_cases::import_schedule::notifier::DownstreamNotifier;
use crate::modules::schedules::use_cases::import_schedule::session::{ImportSession, ProcessingGuard};
use crate::shared::infrastructure::report_store::{ReportKind, ReportWriter};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub run_id: Uuid,
    pub period: String,
    pub extracted: usize,
    pub late_shifts: usize,
    pub persisted: usize,
}

impl ImportSummary {
    fn report(&self) -> String {
        format!(
            "Schedule import {} for {} finished.\nEntries extracted: {}\nLate shifts added: {}\nEntries persisted: {}\n",
            self.run_id, self.period, self.extracted, self.late_shifts, self.persisted
        )
    }
}

pub struct ImportPorts {
    pub workbooks: Arc<dyn WorkbookReader>,
    pub staff: Arc<dyn StaffDirectory>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub statistics: Arc<dyn StatisticsRepository>,
    pub reports: Arc<dyn ReportWriter>,
}

pub struct ImportScheduleHandler {
    session: Arc<ImportSession>,
    ports: ImportPorts,
    notifier: DownstreamNotifier,
}

impl ImportScheduleHandler {
    pub fn new(session: Arc<ImportSession>, ports: ImportPorts, notifier: DownstreamNotifier) -> Self {
        Self {
            session,
            ports,
            notifier,
        }
    }

    pub fn session(&self) -> &Arc<ImportSession> {
        &self.session
    }

    /// Runs the import on its own task. Dropping the returned future does not stop the
    /// run; only `cancel_processing` does, at the next checkpoint.
    pub async fn handle(self: &Arc<Self>, command: ImportSchedule) -> Result<ImportSummary, ImportError> {
        let Some(guard) = self.session.try_begin() else {
            tracing::warn!(path = %command.path.display(), "import rejected, another one is running");
            return Err(ImportError::Busy);
        };
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!("import_schedule", %run_id, path = %command.path.display());

        let handler = Arc::clone(self);
        let run = tokio::spawn(
            async move {
                tracing::info!("import started");
                let result = handler.run(&guard, run_id, &command).await;
                match &result {
                    Ok(summary) => tracing::info!(
                        period = %summary.period,
                        persisted = summary.persisted,
                        late_shifts = summary.late_shifts,
                        "import finished"
                    ),
                    Err(error) => {
                        tracing::warn!(error = %format!("{error:#}"), "import failed");
                        handler.write_failure_report(&command.path, run_id, error).await;
                    }
                }
                drop(guard);
                result
            }
            .instrument(span),
        );

        match run.await {
            Ok(result) => result,
            Err(error) => {
                tracing::error!(%run_id, %error, "import task ended abnormally");
                Err(ImportError::Processing(anyhow::anyhow!("import task ended abnormally: {error}")))
            }
        }
    }

    async fn run(
        &self,
        guard: &ProcessingGuard,
        run_id: Uuid,
        command: &ImportSchedule,
    ) -> Result<ImportSummary, ImportError> {
        let grid = self.ports.workbooks.open(&command.path).await?;
        let roster = self
            .ports
            .staff
            .roster()
            .await
            .context("cannot load employee codes and room names")?;
        validate(&grid, &roster)?;

        let period = period_of(&command.path)?;
        let mut entries = extract_entries(&grid, &roster, period, || guard.is_cancel_requested());
        if guard.is_cancel_requested() {
            return Err(ImportError::Cancelled);
        }
        let extracted = entries.len();
        tracing::debug!(%period, extracted, "entries extracted");

        let removed_entries = self
            .ports
            .schedules
            .delete_unprocessed(period)
            .await
            .context("cannot remove unprocessed schedule entries")?;
        let removed_statistics = self
            .ports
            .statistics
            .delete_unprocessed(period)
            .await
            .context("cannot remove unprocessed statistics")?;
        tracing::debug!(removed_entries, removed_statistics, "previous import discarded");

        let late_shifts = synthesize_late_shifts(&mut entries, period);

        if !guard.begin_persisting() {
            return Err(ImportError::Cancelled);
        }
        self.ports
            .schedules
            .save_all(&entries)
            .await
            .context("cannot save schedule entries")?;

        let summary = ImportSummary {
            run_id,
            period: period.to_string(),
            extracted,
            late_shifts,
            persisted: entries.len(),
        };
        self.notifier.notify(entries, command.credential.clone());

        self.ports
            .reports
            .replace(&command.path, ReportKind::Success, &summary.report())
            .await
            .context("cannot write the processing report")?;
        Ok(summary)
    }

    async fn write_failure_report(&self, source: &Path, run_id: Uuid, error: &ImportError) {
        let text = format!("Schedule import {run_id} failed.\n{error}\n");
        if let Err(report_error) = self.ports.reports.replace(source, ReportKind::Failure, &text).await {
            tracing::error!(error = %report_error, "cannot write the failure report");
        }
    }
}

fn period_of(path: &Path) -> Result<Period, ImportError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Period::from_file_name(&file_name).ok_or(ImportError::MissingPeriod(file_name))
}

#[cfg(test)]
mod import_schedule_handler_tests {
    use super::*;
    use crate::modules::schedules::adapters::outbound::activity_assigner_in_memory::InMemoryActivityAssigner;
    use crate::modules::schedules::adapters::outbound::report_client_in_memory::InMemoryReportClient;
    use crate::modules::schedules::adapters::outbound::schedule_repository_in_memory::{
        InMemorySchedules, StatisticsRecord,
    };
    use crate::modules::schedules::adapters::outbound::staff_directory_in_memory::InMemoryStaffDirectory;
    use crate::modules::schedules::adapters::outbound::workbook_in_memory::InMemoryWorkbookReader;
    use crate::modules::schedules::core::grid::Grid;
    use crate::modules::schedules::core::late_shift::is_late_shift;
    use crate::modules::schedules::core::roster::Roster;
    use crate::modules::schedules::core::schedule_entry::ScheduleEntry;
    use crate::modules::schedules::core::work_mode::WorkMode;
    use crate::shared::infrastructure::report_store::in_memory::InMemoryReportWriter;
    use crate::tests::fixtures::grids::{ScheduleGridBuilder, roster};
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use rstest::{fixture, rstest};
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::join;

    const SOURCE: &str = "/uploads/grafik_2024-03.xlsx";

    struct Harness {
        handler: Arc<ImportScheduleHandler>,
        session: Arc<ImportSession>,
        workbooks: Arc<InMemoryWorkbookReader>,
        schedules: Arc<InMemorySchedules>,
        reports: Arc<InMemoryReportWriter>,
        report_client: Arc<InMemoryReportClient>,
    }

    /// Cancels the session as soon as the roster is requested.
    struct CancellingStaffDirectory {
        session: Arc<ImportSession>,
        roster: Roster,
    }

    #[async_trait]
    impl StaffDirectory for CancellingStaffDirectory {
        async fn roster(&self) -> anyhow::Result<Roster> {
            self.session.cancel_processing();
            Ok(self.roster.clone())
        }
    }

    fn harness_with(
        session: Arc<ImportSession>,
        staff: Arc<dyn StaffDirectory>,
        schedules: InMemorySchedules,
    ) -> Harness {
        let workbooks = Arc::new(InMemoryWorkbookReader::new());
        let schedules = Arc::new(schedules);
        let reports = Arc::new(InMemoryReportWriter::new());
        let report_client = Arc::new(InMemoryReportClient::new());
        let ports = ImportPorts {
            workbooks: workbooks.clone(),
            staff,
            schedules: schedules.clone(),
            statistics: schedules.clone(),
            reports: reports.clone(),
        };
        let notifier = DownstreamNotifier::new(Arc::new(InMemoryActivityAssigner::new()), report_client.clone());
        Harness {
            handler: Arc::new(ImportScheduleHandler::new(session.clone(), ports, notifier)),
            session,
            workbooks,
            schedules,
            reports,
            report_client,
        }
    }

    #[fixture]
    fn harness(roster: Roster) -> Harness {
        harness_with(
            Arc::new(ImportSession::new()),
            Arc::new(InMemoryStaffDirectory::new(roster)),
            InMemorySchedules::new(),
        )
    }

    fn valid_grid() -> Grid {
        ScheduleGridBuilder::new()
            .room("Sala 1", &[])
            .employee("AB", &[(1, "F", "7:00", "15:00"), (2, "CD", "7:00", "15:00")])
            .ok_row()
            .employee("CD", &[(1, "F", "9:00", "17:30")])
            .build()
    }

    fn command(path: &str) -> ImportSchedule {
        ImportSchedule {
            path: PathBuf::from(path),
            credential: "token".to_string(),
        }
    }

    fn march() -> Period {
        Period::new(2024, 3).unwrap()
    }

    fn existing_entry(processed: bool) -> ScheduleEntry {
        let mut entry = ScheduleEntry::new(
            march(),
            10,
            "EF",
            WorkMode::U,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        );
        entry.processed = processed;
        entry
    }

    async fn wait_for_report_request(client: &InMemoryReportClient) {
        for _ in 0..50 {
            if !client.requests().await.is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_import_a_valid_schedule(harness: Harness) {
        harness.workbooks.insert(SOURCE, valid_grid()).await;

        let summary = harness.handler.handle(command(SOURCE)).await.unwrap();

        assert_eq!(summary.period, "2024-03");
        assert_eq!(summary.extracted, 3);
        assert_eq!(summary.late_shifts, 2);
        assert_eq!(summary.persisted, 5);

        let stored = harness.schedules.list_by_period(march()).await.unwrap();
        assert_eq!(stored.len(), 5);
        assert_eq!(stored.iter().filter(|e| is_late_shift(e)).count(), 2);
        let substituted = stored.iter().find(|e| e.day == 2).unwrap();
        assert_eq!(substituted.work_mode, WorkMode::S);
        assert_eq!(substituted.substitute_code.as_deref(), Some("CD"));
        assert_eq!(substituted.room_symbol.as_deref(), Some("Sala 1"));

        let report = harness.reports.get(Path::new(SOURCE), ReportKind::Success).await.unwrap();
        assert!(report.contains("Entries persisted: 5"));
        assert_eq!(harness.reports.count().await, 1);
        assert!(!harness.session.is_processing());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_forward_persisted_entries_and_credential_downstream(harness: Harness) {
        harness.workbooks.insert(SOURCE, valid_grid()).await;
        harness.handler.handle(command(SOURCE)).await.unwrap();

        wait_for_report_request(&harness.report_client).await;
        let requests = harness.report_client.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].credential, "token");
        assert_eq!(requests[0].entries.len(), 5);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_replace_only_unprocessed_data_of_the_period(roster: Roster) {
        let schedules = InMemorySchedules::new();
        schedules.seed(vec![existing_entry(false), existing_entry(true)]).await;
        schedules
            .seed_statistics(vec![
                StatisticsRecord { employee_code: "EF".into(), period: march(), processed: false },
                StatisticsRecord { employee_code: "EF".into(), period: march(), processed: true },
            ])
            .await;
        let harness = harness_with(
            Arc::new(ImportSession::new()),
            Arc::new(InMemoryStaffDirectory::new(roster)),
            schedules,
        );
        harness.workbooks.insert(SOURCE, valid_grid()).await;

        harness.handler.handle(command(SOURCE)).await.unwrap();

        let stored = harness.schedules.list_by_period(march()).await.unwrap();
        assert_eq!(stored.len(), 6);
        assert_eq!(stored.iter().filter(|e| e.processed).count(), 1);
        let statistics = harness.schedules.all_statistics().await;
        assert_eq!(statistics.len(), 1);
        assert!(statistics[0].processed);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_invalid_content_and_report_every_violation(harness: Harness) {
        let grid = ScheduleGridBuilder::new()
            .employee("AB", &[(1, "X", "7:00", "15:00"), (2, "Y", "7:00", "15:00")])
            .build();
        harness.workbooks.insert(SOURCE, grid).await;

        let result = harness.handler.handle(command(SOURCE)).await;

        let Err(ImportError::ContentValidation(errors)) = &result else {
            panic!("expected content validation failure, got {result:?}");
        };
        assert_eq!(errors.len(), 2);
        let report = harness.reports.get(Path::new(SOURCE), ReportKind::Failure).await.unwrap();
        assert!(report.contains("B2: \"X\""));
        assert!(report.contains("C2: \"Y\""));
        assert!(harness.schedules.all().await.is_empty());
        assert!(!harness.session.is_processing());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_on_a_sheet_without_header(harness: Harness) {
        harness.workbooks.insert(SOURCE, Grid::from_text_rows(vec![vec!["AB", "F"]])).await;
        let result = harness.handler.handle(command(SOURCE)).await;
        assert!(matches!(result, Err(ImportError::StructuralValidation)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_the_file_is_missing(harness: Harness) {
        let result = harness.handler.handle(command(SOURCE)).await;
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
        assert!(harness.reports.get(Path::new(SOURCE), ReportKind::Failure).await.is_some());
    }

    #[rstest]
    #[case("/uploads/grafik.xlsx")]
    #[case("/uploads/grafik_2024-13.xlsx")]
    #[tokio::test]
    async fn it_should_fail_without_a_period_in_the_file_name(harness: Harness, #[case] path: &str) {
        harness.workbooks.insert(path, valid_grid()).await;
        let result = harness.handler.handle(command(path)).await;
        assert!(matches!(result, Err(ImportError::MissingPeriod(_))));
        assert!(harness.schedules.all().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_replace_a_previous_failure_report_on_success(harness: Harness) {
        let first = harness.handler.handle(command(SOURCE)).await;
        assert!(first.is_err());
        harness.workbooks.insert(SOURCE, valid_grid()).await;

        harness.handler.handle(command(SOURCE)).await.unwrap();

        assert!(harness.reports.get(Path::new(SOURCE), ReportKind::Failure).await.is_none());
        assert!(harness.reports.get(Path::new(SOURCE), ReportKind::Success).await.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_second_import_while_one_is_running(harness: Harness) {
        harness.workbooks.insert(SOURCE, valid_grid()).await;
        harness.schedules.set_delay_save_ms(30);

        let (first, second) = join!(
            harness.handler.handle(command(SOURCE)),
            harness.handler.handle(command(SOURCE))
        );

        assert!(first.is_ok() ^ second.is_ok(), "exactly one import should run");
        let error = first.err().or(second.err()).unwrap();
        assert!(matches!(error, ImportError::Busy));
        assert_eq!(harness.schedules.all().await.len(), 5);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_finish_the_run_when_the_caller_gives_up(roster: Roster) {
        let schedules = InMemorySchedules::new();
        schedules.seed(vec![existing_entry(false)]).await;
        schedules.set_delay_save_ms(100);
        let harness = harness_with(
            Arc::new(ImportSession::new()),
            Arc::new(InMemoryStaffDirectory::new(roster)),
            schedules,
        );
        harness.workbooks.insert(SOURCE, valid_grid()).await;

        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), harness.handler.handle(command(SOURCE))).await;
        assert!(abandoned.is_err(), "the caller should have timed out");

        for _ in 0..100 {
            if !harness.session.is_processing() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!harness.session.is_processing());
        let stored = harness.schedules.list_by_period(march()).await.unwrap();
        assert_eq!(stored.len(), 5);
        assert!(!stored.iter().any(|e| e.day == 10));
        assert!(harness.reports.get(Path::new(SOURCE), ReportKind::Success).await.is_some());
        assert!(harness.reports.get(Path::new(SOURCE), ReportKind::Failure).await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_stop_without_touching_stored_data_when_cancelled(roster: Roster) {
        let schedules = InMemorySchedules::new();
        schedules.seed(vec![existing_entry(false)]).await;
        let session = Arc::new(ImportSession::new());
        let staff = Arc::new(CancellingStaffDirectory {
            session: session.clone(),
            roster,
        });
        let harness = harness_with(session, staff, schedules);
        harness.workbooks.insert(SOURCE, valid_grid()).await;

        let result = harness.handler.handle(command(SOURCE)).await;

        assert!(matches!(result, Err(ImportError::Cancelled)));
        assert_eq!(harness.schedules.all().await.len(), 1);
        assert!(harness.reports.get(Path::new(SOURCE), ReportKind::Failure).await.is_some());
        assert!(!harness.session.is_processing());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_start_pre_cancelled(harness: Harness) {
        harness.session.cancel_processing();
        harness.workbooks.insert(SOURCE, valid_grid()).await;
        assert!(harness.handler.handle(command(SOURCE)).await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_schedule_repository_is_offline(roster: Roster) {
        let mut schedules = InMemorySchedules::new();
        schedules.toggle_offline();
        let harness = harness_with(
            Arc::new(ImportSession::new()),
            Arc::new(InMemoryStaffDirectory::new(roster)),
            schedules,
        );
        harness.workbooks.insert(SOURCE, valid_grid()).await;

        let result = harness.handler.handle(command(SOURCE)).await;

        let Err(ImportError::Processing(error)) = result else {
            panic!("expected processing failure");
        };
        assert!(format!("{error:#}").contains("Schedule repository offline"));
        assert!(!harness.session.is_processing());
    }
}
