// Composition root for the schedule import service.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete infrastructure implementations.
// - Wire implementations into use case handlers.
// - Spawn background workers (job queue, assignment scheduler).

pub mod config;
pub mod http;
pub mod state;
pub mod workers;

use crate::modules::schedules::adapters::outbound::activity_assigner::ActivityAssigner;
use crate::modules::schedules::adapters::outbound::activity_assigner_in_memory::InMemoryActivityAssigner;
use crate::modules::schedules::adapters::outbound::report_client::ReportClient;
use crate::modules::schedules::adapters::outbound::report_client_http::HttpReportClient;
use crate::modules::schedules::adapters::outbound::report_client_in_memory::InMemoryReportClient;
use crate::modules::schedules::adapters::outbound::schedule_repository_in_memory::InMemorySchedules;
use crate::modules::schedules::adapters::outbound::staff_directory_in_memory::InMemoryStaffDirectory;
use crate::modules::schedules::adapters::outbound::workbook_calamine::CalamineWorkbookReader;
use crate::modules::schedules::core::roster::Roster;
use crate::modules::schedules::use_cases::import_schedule::handler::{ImportPorts, ImportScheduleHandler};
use crate::modules::schedules::use_cases::import_schedule::notifier::DownstreamNotifier;
use crate::modules::schedules::use_cases::import_schedule::session::ImportSession;
use crate::shared::infrastructure::report_store::file_system::FileSystemReportWriter;
use crate::shared::infrastructure::upload_directory::UploadDirectory;
use crate::shell::config::AppConfig;
use crate::shell::state::AppState;
use crate::shell::workers::Workers;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct App {
    pub state: AppState,
    pub workers: Workers,
}

pub fn build(config: &AppConfig, shutdown: CancellationToken) -> App {
    let roster = Roster::new(&config.employee_codes, &config.room_names);
    tracing::info!(employees = roster.employee_count(), "staff directory loaded");

    let schedules = Arc::new(InMemorySchedules::new());
    let assigner: Arc<dyn ActivityAssigner> = Arc::new(InMemoryActivityAssigner::new());
    let report_client: Arc<dyn ReportClient> = match &config.report_service_url {
        Some(url) => Arc::new(HttpReportClient::new(url.clone())),
        None => {
            tracing::warn!("REPORT_SERVICE_URL not set, report requests stay in memory");
            Arc::new(InMemoryReportClient::new())
        }
    };

    let session = Arc::new(ImportSession::new());
    let ports = ImportPorts {
        workbooks: Arc::new(CalamineWorkbookReader::new()),
        staff: Arc::new(InMemoryStaffDirectory::new(roster)),
        schedules: schedules.clone(),
        statistics: schedules,
        reports: Arc::new(FileSystemReportWriter::new()),
    };
    let notifier = DownstreamNotifier::new(assigner.clone(), report_client);
    let import_handler = Arc::new(ImportScheduleHandler::new(session.clone(), ports, notifier));

    let workers = Workers::start(assigner, config.assignment_interval, shutdown);
    let state = AppState {
        import_handler,
        session,
        uploads: UploadDirectory::new(config.upload_dir.clone()),
    };
    App { state, workers }
}
