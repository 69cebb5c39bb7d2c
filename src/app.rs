use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/sets", post(handlers::add_set))
        .route("/api/sets/:index", delete(handlers::delete_set))
        .route("/api/sets/:index/kind", post(handlers::set_kind))
        .route("/api/sets/:index/reps", post(handlers::set_reps))
        .route("/api/sets/:index/toggle", post(handlers::toggle_set))
        .route("/api/sets/:index/up", post(handlers::move_set_up))
        .route("/api/sets/:index/down", post(handlers::move_set_down))
        .route("/api/streak/increment", post(handlers::streak_increment))
        .route("/api/streak/reset", post(handlers::streak_reset))
        .with_state(state)
}
