//! # Error Handling Middleware
//!
//! Maps [`ScheduleError`] to HTTP status codes and a JSON body of the form
//! `{ "error": message, "details": ... }`, where `details` carries the
//! per-field validation errors or the conflict report.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tutorgrid_core::errors::ScheduleError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use tutorgrid_api::middleware::error_handling::AppError;
/// use tutorgrid_core::errors::ScheduleError;
///
/// async fn handler() -> Result<Json<()>, AppError> {
///     Err(AppError(ScheduleError::NotFound("Slot".to_string())))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::Validation(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Conflict(_) => StatusCode::CONFLICT,
            ScheduleError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Value {
        match &self.0 {
            ScheduleError::Validation(errors) => json!(errors),
            ScheduleError::Conflict(report) => json!(report),
            ScheduleError::NotFound(_) | ScheduleError::Storage(_) => Value::Null,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string(), "details": self.details() }));
        (status, body).into_response()
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ScheduleError::Storage(err))
    }
}

/// Maps a ScheduleError to an HTTP response
pub fn map_error(err: ScheduleError) -> Response {
    AppError(err).into_response()
}
