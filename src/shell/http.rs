use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::schedules::use_cases::import_schedule::inbound::http as import_http;
use crate::shell::state::AppState;

const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/schedule-imports", post(import_http::handle))
        .route("/schedule-imports/cancel", post(import_http::cancel))
        .route("/schedule-imports/status", get(import_http::status))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
