use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tutorgrid_core::conflict::ConflictPair;
use tutorgrid_core::errors::{ScheduleError, SlotField, ValidationErrors};
use tutorgrid_core::lanes::PlacementKind;
use tutorgrid_core::models::{DayOfWeek, StudentId, TeacherId};
use tutorgrid_core::week::{DayBoard, SlotFilter, WeekBoard};

use crate::{middleware::error_handling::AppError, ApiState};

/// Query string accepted by the board endpoints
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    pub placement: Option<PlacementKind>,
    pub teacher: Option<TeacherId>,
    pub student: Option<StudentId>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl BoardQuery {
    fn filter(&self) -> SlotFilter {
        SlotFilter {
            teacher_id: self.teacher.clone(),
            student_id: self.student.clone(),
            day: None,
            include_inactive: self.include_inactive,
        }
    }
}

pub async fn week_board(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<WeekBoard>, AppError> {
    let strategy = state.strategy(query.placement);
    let board = state.scheduler.week_board(&query.filter(), strategy.as_ref()).await?;
    Ok(Json(board))
}

pub async fn day_board(
    State(state): State<Arc<ApiState>>,
    Path(day): Path<String>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<DayBoard>, AppError> {
    let day: DayOfWeek = day
        .parse()
        .map_err(|message: String| ScheduleError::Validation(ValidationErrors::single(SlotField::DayOfWeek, message)))?;

    let strategy = state.strategy(query.placement);
    let board = state.scheduler.day_board(day, &query.filter(), strategy.as_ref()).await?;
    Ok(Json(board))
}

pub async fn conflicts(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<ConflictPair>>, AppError> {
    let pairs = state.scheduler.audit().await?;
    Ok(Json(pairs))
}
