use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/board", get(handlers::board::week_board))
        .route("/api/board/:day", get(handlers::board::day_board))
        .route("/api/conflicts", get(handlers::board::conflicts))
        .route("/api/teachers/:id/students", get(handlers::directory::teacher_students))
}
