use crate::modules::schedules::use_cases::import_schedule::handler::ImportScheduleHandler;
use crate::modules::schedules::use_cases::import_schedule::session::ImportSession;
use crate::shared::infrastructure::upload_directory::UploadDirectory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub import_handler: Arc<ImportScheduleHandler>,
    pub session: Arc<ImportSession>,
    pub uploads: UploadDirectory,
}
