use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::modules::schedules::use_cases::import_schedule::command::ImportSchedule;
use crate::modules::schedules::use_cases::import_schedule::errors::ImportError;
use crate::shared::infrastructure::upload_directory::UploadError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ImportScheduleParams {
    pub file_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatusResponse {
    pub processing: bool,
    pub cancel_requested: bool,
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ImportScheduleParams>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let Some(file_name) = params.file_name else {
        return error_response(StatusCode::BAD_REQUEST, "file_name is required");
    };
    let Some(credential) = bearer_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    // The upload slot is shared, so a running import must not see its file replaced.
    if state.session.is_processing() {
        return error_response(StatusCode::CONFLICT, ImportError::Busy);
    }

    let path = match state.uploads.store(&file_name, &body).await {
        Ok(path) => path,
        Err(error @ UploadError::InvalidFileName(_)) => {
            return error_response(StatusCode::BAD_REQUEST, error);
        }
        Err(UploadError::Io(error)) => {
            tracing::error!(%error, "cannot store the uploaded schedule");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.import_handler.handle(ImportSchedule { path, credential }).await {
        Ok(summary) => (StatusCode::CREATED, Json(summary)).into_response(),
        Err(error) => {
            let status = match &error {
                ImportError::Busy | ImportError::Cancelled => StatusCode::CONFLICT,
                ImportError::StructuralValidation
                | ImportError::ContentValidation(_)
                | ImportError::MissingPeriod(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ImportError::FileNotFound(_) => StatusCode::NOT_FOUND,
                ImportError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, error)
        }
    }
}

pub async fn cancel(State(state): State<AppState>) -> impl IntoResponse {
    state.session.cancel_processing();
    StatusCode::ACCEPTED
}

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(ImportStatusResponse {
        processing: state.session.is_processing(),
        cancel_requested: state.session.is_cancel_requested(),
    })
}
