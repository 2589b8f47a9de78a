use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};

use crate::{
    dto::{
        session::{ActionResponse, ModeResponse, SelectModeRequest, SessionSnapshot, WordResponse},
        timer::{StartTimerRequest, TimerDurationRequest, TimerDurationResponse, TimerStatus},
    },
    error::AppError,
    services::session_service,
    state::SharedState,
};

/// Game session endpoints: mode, word and countdown.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/session", get(get_session).delete(reset_session))
        .route("/session/mode", post(select_mode))
        .route("/session/mode/change", post(change_mode))
        .route("/session/word", post(draw_word))
        .route("/session/timer", get(timer_status))
        .route("/session/timer/duration", put(set_timer_duration))
        .route("/session/timer/start", post(start_timer))
        .route("/session/timer/stop", post(stop_timer))
}

/// Current mode, word, countdown and standing.
#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    responses((status = 200, description = "Session snapshot", body = SessionSnapshot))
)]
pub async fn get_session(State(state): State<SharedState>) -> Json<SessionSnapshot> {
    Json(session_service::snapshot(&state).await)
}

/// End the session and start a new one. Teams and scores are kept.
#[utoipa::path(
    delete,
    path = "/session",
    tag = "session",
    responses((status = 200, description = "Session reset", body = ActionResponse))
)]
pub async fn reset_session(State(state): State<SharedState>) -> Json<ActionResponse> {
    Json(session_service::reset_session(&state).await)
}

/// Pick the game mode, or let the wheel pick it with `"random"`.
#[utoipa::path(
    post,
    path = "/session/mode",
    tag = "session",
    request_body = SelectModeRequest,
    responses((status = 200, description = "Mode selected", body = ModeResponse))
)]
pub async fn select_mode(
    State(state): State<SharedState>,
    Json(payload): Json<SelectModeRequest>,
) -> Json<ModeResponse> {
    Json(session_service::select_mode(&state, payload.mode.into()).await)
}

/// Go back to mode selection.
#[utoipa::path(
    post,
    path = "/session/mode/change",
    tag = "session",
    responses((status = 200, description = "Mode cleared", body = ActionResponse))
)]
pub async fn change_mode(State(state): State<SharedState>) -> Json<ActionResponse> {
    Json(session_service::change_mode(&state).await)
}

/// Draw a random word for the selected mode.
#[utoipa::path(
    post,
    path = "/session/word",
    tag = "session",
    responses(
        (status = 200, description = "Word drawn", body = WordResponse),
        (status = 404, description = "No words configured for the mode"),
        (status = 409, description = "No mode selected")
    )
)]
pub async fn draw_word(State(state): State<SharedState>) -> Result<Json<WordResponse>, AppError> {
    Ok(Json(session_service::draw_word(&state).await?))
}

/// Remaining time on the countdown.
#[utoipa::path(
    get,
    path = "/session/timer",
    tag = "session",
    responses((status = 200, description = "Timer status", body = TimerStatus))
)]
pub async fn timer_status(State(state): State<SharedState>) -> Json<TimerStatus> {
    Json(session_service::poll_timer(&state).await)
}

/// Change the default countdown length.
#[utoipa::path(
    put,
    path = "/session/timer/duration",
    tag = "session",
    request_body = TimerDurationRequest,
    responses(
        (status = 200, description = "Duration updated", body = TimerDurationResponse),
        (status = 400, description = "Duration outside the configured range")
    )
)]
pub async fn set_timer_duration(
    State(state): State<SharedState>,
    Json(payload): Json<TimerDurationRequest>,
) -> Result<Json<TimerDurationResponse>, AppError> {
    Ok(Json(
        session_service::set_timer_duration(&state, payload.seconds).await?,
    ))
}

/// Start the countdown. The body is optional.
#[utoipa::path(
    post,
    path = "/session/timer/start",
    tag = "session",
    request_body(content = StartTimerRequest, description = "Optional; without it the session default duration is used"),
    responses(
        (status = 200, description = "Timer started", body = TimerStatus),
        (status = 400, description = "Duration outside the configured range")
    )
)]
pub async fn start_timer(
    State(state): State<SharedState>,
    payload: Option<Json<StartTimerRequest>>,
) -> Result<Json<TimerStatus>, AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    Ok(Json(session_service::start_timer(&state, request).await?))
}

/// Stop the countdown.
#[utoipa::path(
    post,
    path = "/session/timer/stop",
    tag = "session",
    responses((status = 200, description = "Timer stopped", body = ActionResponse))
)]
pub async fn stop_timer(State(state): State<SharedState>) -> Json<ActionResponse> {
    Json(session_service::stop_timer(&state).await)
}
