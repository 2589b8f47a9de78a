use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use validator::Validate;

use crate::{
    dto::team::{
        CreateTeamRequest, ScoreAdjustmentRequest, ScoreUpdateResponse, ScoreboardResponse,
        StandingDto,
    },
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Team roster and scoring endpoints. Everything under `/teams/` is keyed by
/// team name; scoreboard-wide actions live under `/scores`.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route("/teams/{name}", delete(delete_team))
        .route("/teams/{name}/score", post(adjust_score))
        .route("/scores/reset", post(reset_scores))
        .route("/scores/standing", get(standing))
}

/// List every team with its score.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses((status = 200, description = "Scoreboard", body = ScoreboardResponse))
)]
pub async fn list_teams(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(team_service::list_teams(&state).await)
}

/// Register a new team with a score of zero.
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team created", body = ScoreboardResponse),
        (status = 400, description = "Invalid team name"),
        (status = 409, description = "Team already exists")
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<Json<ScoreboardResponse>, AppError> {
    payload.validate()?;
    Ok(Json(team_service::add_team(&state, payload).await?))
}

/// Remove a team and its score.
#[utoipa::path(
    delete,
    path = "/teams/{name}",
    tag = "teams",
    params(("name" = String, Path, description = "Name of the team to remove")),
    responses(
        (status = 200, description = "Team removed", body = ScoreboardResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<ScoreboardResponse>, AppError> {
    Ok(Json(team_service::remove_team(&state, &name).await?))
}

/// Add or remove points; the score never drops below zero.
#[utoipa::path(
    post,
    path = "/teams/{name}/score",
    tag = "teams",
    params(("name" = String, Path, description = "Name of the team to score")),
    request_body = ScoreAdjustmentRequest,
    responses(
        (status = 200, description = "Score updated", body = ScoreUpdateResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn adjust_score(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(payload): Json<ScoreAdjustmentRequest>,
) -> Result<Json<ScoreUpdateResponse>, AppError> {
    payload.validate()?;
    Ok(Json(
        team_service::adjust_score(&state, &name, payload).await?,
    ))
}

/// Set every team's score back to zero.
#[utoipa::path(
    post,
    path = "/scores/reset",
    tag = "teams",
    responses((status = 200, description = "Scores reset", body = ScoreboardResponse))
)]
pub async fn reset_scores(
    State(state): State<SharedState>,
) -> Result<Json<ScoreboardResponse>, AppError> {
    Ok(Json(team_service::reset_scores(&state).await?))
}

/// Current leader, tie or no leader.
#[utoipa::path(
    get,
    path = "/scores/standing",
    tag = "teams",
    responses((status = 200, description = "Standing", body = StandingDto))
)]
pub async fn standing(State(state): State<SharedState>) -> Json<StandingDto> {
    Json(team_service::standing(&state).await)
}
