use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tutorgrid_core::models::{Student, TeacherId};

use crate::{middleware::error_handling::AppError, ApiState};

/// Students the new-schedule form offers for a teacher.
pub async fn teacher_students(
    State(state): State<Arc<ApiState>>,
    Path(teacher_id): Path<TeacherId>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.scheduler.selectable_students(teacher_id).await?;
    Ok(Json(students))
}
