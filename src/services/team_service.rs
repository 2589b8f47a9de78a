//! Roster and score management. Each mutation is applied to the in-memory
//! scoreboard first, then the whole mapping is written to the score store.
//! A failed write is reported back as a warning and never undone.

use tracing::info;

use crate::{
    dto::team::{
        CreateTeamRequest, ScoreAdjustmentRequest, ScoreUpdateResponse, ScoreboardResponse,
        StandingDto, TeamSummary, teams_to_summaries,
    },
    error::ServiceError,
    services::sse_events,
    state::{ScoreUpdate, SharedState},
};

/// All teams in display order with the current standing.
pub async fn list_teams(state: &SharedState) -> ScoreboardResponse {
    let (scores, standing) = state
        .read_scoreboard(|board| (board.scores().clone(), board.standing()))
        .await;
    ScoreboardResponse::new(scores, standing, None)
}

/// Current leader or tie, if any team scored.
pub async fn standing(state: &SharedState) -> StandingDto {
    state
        .read_scoreboard(|board| board.standing())
        .await
        .into()
}

/// Register a team with a zero score.
pub async fn add_team(
    state: &SharedState,
    request: CreateTeamRequest,
) -> Result<ScoreboardResponse, ServiceError> {
    let CreateTeamRequest { name } = request;

    let update = state
        .with_scoreboard_mut(|board| board.add_team(&name))
        .await?;

    info!(team = %name, "team added");
    sse_events::broadcast_team_created(
        state,
        TeamSummary {
            name: name.clone(),
            score: 0,
        },
    );

    Ok(into_scoreboard_response(update))
}

/// Delete a team and its score.
pub async fn remove_team(
    state: &SharedState,
    name: &str,
) -> Result<ScoreboardResponse, ServiceError> {
    let update = state
        .with_scoreboard_mut(|board| board.remove_team(name))
        .await?;

    info!(team = %name, final_score = update.value, "team removed");
    sse_events::broadcast_team_deleted(state, name);

    Ok(into_scoreboard_response(update))
}

/// Add `delta` to a team's score; the result never drops below zero.
pub async fn adjust_score(
    state: &SharedState,
    name: &str,
    request: ScoreAdjustmentRequest,
) -> Result<ScoreUpdateResponse, ServiceError> {
    let ScoreAdjustmentRequest { delta } = request;

    let update = state
        .with_scoreboard_mut(|board| board.adjust_score(name, delta))
        .await?;

    let team = TeamSummary {
        name: name.to_owned(),
        score: update.value,
    };
    let standing = StandingDto::from(update.standing);
    info!(team = %name, delta, score = team.score, "score adjusted");
    sse_events::broadcast_score_updated(state, team.clone(), standing.clone());

    Ok(ScoreUpdateResponse {
        team,
        standing,
        warning: update.persist_error.map(|err| err.to_string()),
    })
}

/// Zero every team's score with a single save.
pub async fn reset_scores(state: &SharedState) -> Result<ScoreboardResponse, ServiceError> {
    let update = state
        .with_scoreboard_mut(|board| {
            let names: Vec<String> = board.team_names().map(str::to_owned).collect();
            board.reset_all(names.iter().map(String::as_str));
            Ok(())
        })
        .await?;

    info!(teams = update.scores.len(), "scores reset");
    sse_events::broadcast_scores_reset(state, teams_to_summaries(update.scores.clone()));

    Ok(into_scoreboard_response(update))
}

fn into_scoreboard_response<T>(update: ScoreUpdate<T>) -> ScoreboardResponse {
    let ScoreUpdate {
        scores,
        standing,
        persist_error,
        ..
    } = update;
    ScoreboardResponse::new(scores, standing, persist_error.map(|err| err.to_string()))
}
