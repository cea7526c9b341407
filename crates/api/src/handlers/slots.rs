use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tutorgrid_core::models::{ScheduleSlot, SlotDraft, SlotId, SlotPatch};

use crate::{middleware::error_handling::AppError, ApiState};

pub async fn list_slots(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<ScheduleSlot>>, AppError> {
    let slots = state.scheduler.list_slots().await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SlotDraft>,
) -> Result<(StatusCode, Json<ScheduleSlot>), AppError> {
    let slot = state.scheduler.create_slot(payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<SlotId>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let slot = state.scheduler.get_slot(id).await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<SlotId>,
    Json(payload): Json<SlotPatch>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let slot = state.scheduler.update_slot(id, payload).await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<SlotId>,
) -> Result<StatusCode, AppError> {
    state.scheduler.delete_slot(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
