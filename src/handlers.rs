use crate::editor::{EditError, coerce_reps};
use crate::errors::AppError;
use crate::models::{KindRequest, RepsRequest, StateResponse};
use crate::state::{AppState, Session};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    response::Html,
};
use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let mut session = state.session.lock().await;
    session.refresh_summary(today, &state.glyphs);
    Html(render_index(&session))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let today = today();
    let mut session = state.session.lock().await;
    session.refresh_summary(today, &state.glyphs);
    Json(session.to_response(today))
}

pub async fn get_summary(State(state): State<AppState>) -> String {
    let mut session = state.session.lock().await;
    session.refresh_summary(today(), &state.glyphs);
    session.summary.clone()
}

pub async fn add_set(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "add set", |session| {
        session.sets.push_default();
        Ok(())
    })
    .await
}

pub async fn set_kind(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<KindRequest>,
) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "set kind", |session| {
        session.sets.set_kind(index, payload.kind)
    })
    .await
}

pub async fn set_reps(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<RepsRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let reps = coerce_reps(&payload.reps);
    apply(&state, "set reps", |session| session.sets.set_reps(index, reps)).await
}

pub async fn toggle_set(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "toggle set", |session| {
        session.sets.toggle(index).map(|_| ())
    })
    .await
}

pub async fn move_set_up(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "move set up", |session| {
        session.sets.move_up(index).map(|_| ())
    })
    .await
}

pub async fn move_set_down(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "move set down", |session| {
        session.sets.move_down(index).map(|_| ())
    })
    .await
}

pub async fn delete_set(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "delete set", |session| {
        session.sets.remove(index).map(|_| ())
    })
    .await
}

pub async fn streak_increment(
    State(state): State<AppState>,
) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "increment streak", |session| {
        session.streak.increment();
        Ok(())
    })
    .await
}

pub async fn streak_reset(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    apply(&state, "reset streak", |session| {
        session.streak.reset();
        Ok(())
    })
    .await
}

/// Runs one intent to completion under the session lock: mutate, persist,
/// then regenerate the summary. A rejected edit skips the last two steps.
async fn apply(
    state: &AppState,
    intent: &'static str,
    edit: impl FnOnce(&mut Session) -> Result<(), EditError>,
) -> Result<Json<StateResponse>, AppError> {
    let today = today();
    let mut session = state.session.lock().await;
    edit(&mut *session)?;

    let outcome = session.persist(&state.data_dir).await;
    if !outcome.is_complete() {
        warn!("{intent}: state kept in memory only");
    }
    session.refresh_summary(today, &state.glyphs);
    debug!(
        intent,
        sets = session.sets.len(),
        streak = session.streak.value(),
        "applied"
    );

    Ok(Json(session.to_response(today)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
